use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "medassist", version, about = "MedAssist health assistant")]
pub struct CliArgs {
    /// Run without the terminal UI and print results
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Headless: look up a disease by name
    #[arg(long, value_name = "NAME")]
    pub disease: Option<String>,

    /// Headless: list medical facilities and pharmacies near an address
    #[arg(long, value_name = "ADDRESS")]
    pub near: Option<String>,

    /// Override the device latitude
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Override the device longitude
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Override the nearby search radius
    #[arg(long, value_name = "METERS", value_parser = clap::value_parser!(u32).range(1..))]
    pub radius: Option<u32>,

    /// Override the appointment receipt directory
    #[arg(long = "receipt-dir", value_name = "PATH")]
    pub receipt_dir: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(lat) = self.lat {
            std::env::set_var("MEDASSIST_LATITUDE", lat.to_string());
        }
        if let Some(lng) = self.lng {
            std::env::set_var("MEDASSIST_LONGITUDE", lng.to_string());
        }
        if let Some(radius) = self.radius {
            std::env::set_var("SEARCH_RADIUS_METERS", radius.to_string());
        }
        if let Some(dir) = &self.receipt_dir {
            std::env::set_var("RECEIPT_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug || std::env::var("DEBUG").is_ok_and(|value| value == "1")
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

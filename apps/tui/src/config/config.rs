use crate::domain::Coordinate;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const DEFAULT_DISEASE_API_URL: &str = "http://localhost:8000";
const DEFAULT_PREDICTION_API_URL: &str = "http://localhost:5000";
const DEFAULT_CHAT_API_URL: &str = "http://localhost:5001";
const DEFAULT_SEARCH_RADIUS_METERS: u32 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("configured location {0} is outside the valid latitude/longitude range")]
    InvalidLocation(Coordinate),
    #[error("{0} is set but its counterpart coordinate is missing")]
    IncompleteLocation(&'static str),
}

/// Runtime configuration for the client, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub disease_api_url: String,
    pub prediction_api_url: String,
    pub chat_api_url: String,
    /// Position reported by the geolocation step. `None` behaves like a
    /// denied permission prompt.
    pub device_location: Option<Coordinate>,
    pub search_radius_m: u32,
    pub receipt_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            maps_api_key: None,
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
            disease_api_url: DEFAULT_DISEASE_API_URL.to_string(),
            prediction_api_url: DEFAULT_PREDICTION_API_URL.to_string(),
            chat_api_url: DEFAULT_CHAT_API_URL.to_string(),
            device_location: None,
            search_radius_m: DEFAULT_SEARCH_RADIUS_METERS,
            receipt_dir: PathBuf::from("./receipts"),
        }
    }
}

/// Loads `.env` and builds the configuration from environment variables.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();
    AppConfig::from_lookup(|name| env::var(name).ok())
}

impl AppConfig {
    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let device_location = match (
            non_empty("MEDASSIST_LATITUDE"),
            non_empty("MEDASSIST_LONGITUDE"),
        ) {
            (Some(lat), Some(lng)) => {
                let location = Coordinate::new(
                    parse_number("MEDASSIST_LATITUDE", &lat)?,
                    parse_number("MEDASSIST_LONGITUDE", &lng)?,
                );
                if !location.is_valid() {
                    return Err(ConfigError::InvalidLocation(location));
                }
                Some(location)
            }
            (Some(_), None) => return Err(ConfigError::IncompleteLocation("MEDASSIST_LATITUDE")),
            (None, Some(_)) => return Err(ConfigError::IncompleteLocation("MEDASSIST_LONGITUDE")),
            (None, None) => None,
        };

        let search_radius_m = match non_empty("SEARCH_RADIUS_METERS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "SEARCH_RADIUS_METERS",
                    value: raw.clone(),
                })?,
            None => defaults.search_radius_m,
        };

        Ok(Self {
            maps_api_key: non_empty("GOOGLE_MAPS_API_KEY"),
            maps_base_url: non_empty("GOOGLE_MAPS_BASE_URL").unwrap_or(defaults.maps_base_url),
            disease_api_url: non_empty("DISEASE_API_URL").unwrap_or(defaults.disease_api_url),
            prediction_api_url: non_empty("PREDICTION_API_URL")
                .unwrap_or(defaults.prediction_api_url),
            chat_api_url: non_empty("CHAT_API_URL").unwrap_or(defaults.chat_api_url),
            device_location,
            search_radius_m,
            receipt_dir: non_empty("RECEIPT_DIR").map_or(defaults.receipt_dir, PathBuf::from),
        })
    }
}

fn parse_number(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.disease_api_url, "http://localhost:8000");
        assert_eq!(config.chat_api_url, "http://localhost:5001");
        assert_eq!(config.search_radius_m, 5000);
        assert!(config.device_location.is_none());
        assert!(config.maps_api_key.is_none());
    }

    #[test]
    fn reads_location_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MEDASSIST_LATITUDE", "19.139"),
            ("MEDASSIST_LONGITUDE", "72.839"),
            ("SEARCH_RADIUS_METERS", "2500"),
            ("GOOGLE_MAPS_API_KEY", "key"),
        ]))
        .unwrap();
        assert_eq!(config.device_location, Some(Coordinate::new(19.139, 72.839)));
        assert_eq!(config.search_radius_m, 2500);
        assert_eq!(config.maps_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn half_a_location_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("MEDASSIST_LATITUDE", "10")])).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteLocation(_)));
    }

    #[test]
    fn bad_numbers_are_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("SEARCH_RADIUS_METERS", "far")]))
            .unwrap_err();
        assert!(err.to_string().contains("SEARCH_RADIUS_METERS"));
    }
}

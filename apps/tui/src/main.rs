use clap::Parser;
use color_eyre::Result;
use medassist_tui::app::{App, AppActions};
use medassist_tui::cli::CliArgs;
use medassist_tui::config::init_app_config;
use medassist_tui::services::Services;
use medassist_tui::{event, terminal};
use tokio::sync::mpsc::unbounded_channel;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    if args.debug_enabled() {
        init_tracing();
    }

    let config = init_app_config()?;
    let services = Services::from_config(&config)?;

    let headless_query = args.disease.is_some() || args.near.is_some();
    if args.headless || headless_query || !is_terminal() {
        event::run_headless(
            &services,
            config.search_radius_m,
            args.disease.as_deref(),
            args.near.as_deref(),
            args.json,
        )
        .await?;
        return Ok(());
    }

    let (tx, rx) = unbounded_channel();
    let actions = AppActions::new(services, config.search_radius_m, tx);
    let mut app = App::new(actions, &config);

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app, rx).await;
    terminal::cleanup_terminal_state(true, true);

    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("medassist_tui=debug,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use medassist_chat_proxy::{router, OpenAiClient, ProxyConfig};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "medassist-chat-proxy", version, about = "Chat proxy for the MedAssist client")]
struct Args {
    /// Address to bind (overrides CHAT_PROXY_HOST)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides CHAT_PROXY_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = ProxyConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!("medassist-chat-proxy/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let client = OpenAiClient::new(
        http,
        config.base_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
    );
    let app = router(Arc::new(client));

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to address: {addr}"))?;
    tracing::info!(%addr, model = %config.model, "chat proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("chat proxy server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

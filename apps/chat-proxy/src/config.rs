use dotenv::dotenv;
use std::env;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub host: IpAddr,
    pub port: u16,
}

impl ProxyConfig {
    /// Loads `.env` and reads the proxy settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = value("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let host_raw = value("CHAT_PROXY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "CHAT_PROXY_HOST",
            value: host_raw.clone(),
        })?;

        let port = match value("CHAT_PROXY_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "CHAT_PROXY_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            base_url: value("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: value("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host,
            port,
        })
    }

    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

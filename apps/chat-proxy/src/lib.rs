// Chat proxy: accepts one message, asks a hosted chat-completion model and
// returns its reply.

pub mod config;
pub mod routes;
pub mod upstream;

pub use config::{ConfigError, ProxyConfig};
pub use routes::{router, ChatRequest, ChatResponse, APOLOGY, UPSTREAM_STATUS_HEADER};
pub use upstream::{CompletionClient, OpenAiClient, UpstreamError};

use super::{endpoint, ensure_success, ChatService, ServiceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

/// Client for the MedAssist chat proxy (`POST /api/chat`).
#[derive(Debug, Clone)]
pub struct ChatProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatProxyClient {
    pub const fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl ChatService for ChatProxyClient {
    async fn send(&self, message: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "api/chat"))
            .json(&ChatRequest { message })
            .send()
            .await?;
        ensure_success(&response)?;

        // The proxy answers 200 even when its upstream failed; the header is
        // the only way to tell.
        if response
            .headers()
            .get("x-upstream-status")
            .is_some_and(|value| value == "error")
        {
            tracing::warn!("chat proxy reported an upstream failure");
        }

        let body = response.json::<ChatReply>().await?;
        Ok(body.reply)
    }
}

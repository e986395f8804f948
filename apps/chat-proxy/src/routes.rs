use crate::upstream::CompletionClient;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const APOLOGY: &str = "I'm sorry, something went wrong. Please try again later.";

/// Tells callers whether the reply came from the model (`ok`) or is the
/// fixed apology (`error`). The status code is 200 either way.
pub const UPSTREAM_STATUS_HEADER: &str = "x-upstream-status";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

type SharedClient = Arc<dyn CompletionClient>;

pub fn router(client: SharedClient) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(client)
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn chat(
    State(client): State<SharedClient>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::error!(error = %rejection, "unreadable chat request");
            return reply(APOLOGY.to_string(), false);
        }
    };

    match client.complete(&request.message).await {
        Ok(content) => {
            tracing::info!(chars = content.len(), "chat reply forwarded");
            reply(content.replace('•', "-"), true)
        }
        Err(err) => {
            tracing::error!(error = %err, "chat completion failed");
            reply(APOLOGY.to_string(), false)
        }
    }
}

fn reply(text: String, upstream_ok: bool) -> Response {
    let status = HeaderValue::from_static(if upstream_ok { "ok" } else { "error" });
    (
        [(HeaderName::from_static(UPSTREAM_STATUS_HEADER), status)],
        Json(ChatResponse { reply: text }),
    )
        .into_response()
}

use async_trait::async_trait;
use medassist_chat_proxy::{
    router, ChatResponse, CompletionClient, UpstreamError, APOLOGY, UPSTREAM_STATUS_HEADER,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Replays a canned completion and records what it was asked.
struct StubModel {
    reply: Option<&'static str>,
    seen: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionClient for StubModel {
    async fn complete(&self, message: &str) -> Result<String, UpstreamError> {
        self.seen.lock().unwrap().push(message.to_string());
        self.reply
            .map(str::to_string)
            .ok_or(UpstreamError::EmptyChoices)
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
async fn serve(model: Arc<StubModel>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(model)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_chat(base: &str, body: &str) -> (StatusCode, String, ChatResponse) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = response.status();
    let upstream = response
        .headers()
        .get(UPSTREAM_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (status, upstream, response.json().await.unwrap())
}

#[tokio::test]
async fn bullets_are_rewritten_as_dashes() {
    let model = StubModel::replying("Tips:\n• Rest\n• Fluids");
    let base = serve(model.clone()).await;

    let (status, upstream, body) = post_chat(&base, r#"{"message":"I have a cold"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream, "ok");
    assert_eq!(body.reply, "Tips:\n- Rest\n- Fluids");
    assert_eq!(*model.seen.lock().unwrap(), vec!["I have a cold".to_string()]);
}

#[tokio::test]
async fn upstream_failure_returns_apology_with_200() {
    let base = serve(StubModel::failing()).await;

    let (status, upstream, body) = post_chat(&base, r#"{"message":"hi"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream, "error");
    assert_eq!(body.reply, APOLOGY);
}

#[tokio::test]
async fn malformed_body_is_masked_too() {
    let model = StubModel::replying("unused");
    let base = serve(model.clone()).await;

    let (status, upstream, body) = post_chat(&base, "not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream, "error");
    assert_eq!(body.reply, APOLOGY);
    assert!(model.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let base = serve(StubModel::replying("x")).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

use super::{endpoint, ensure_success, PredictionService, ServiceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct PredictionRequest<'a> {
    description: &'a str,
}

#[derive(Deserialize)]
struct PredictionResponse {
    response: String,
}

/// Client for the symptom-based prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPredictionService {
    pub const fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, description: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "api/chat"))
            .json(&PredictionRequest { description })
            .send()
            .await?;
        ensure_success(&response)?;

        let body = response.json::<PredictionResponse>().await?;
        Ok(body.response)
    }
}

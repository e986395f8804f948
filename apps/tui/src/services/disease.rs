use super::{endpoint, ensure_success, DiseaseService, ServiceError};
use crate::domain::DiseaseInfo;
use async_trait::async_trait;

/// Client for the disease information API (`GET /disease?disease=<name>`).
#[derive(Debug, Clone)]
pub struct HttpDiseaseService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDiseaseService {
    pub const fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl DiseaseService for HttpDiseaseService {
    async fn lookup(&self, disease: &str) -> Result<DiseaseInfo, ServiceError> {
        let response = self
            .http
            .get(endpoint(&self.base_url, "disease"))
            .query(&[("disease", disease)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(disease.to_string()));
        }
        ensure_success(&response)?;

        let info = response.json::<DiseaseInfo>().await?;
        tracing::debug!(
            disease,
            prevention = info.prevention.len(),
            medicines = info.medicines.len(),
            remedies = info.home_remedies.len(),
            "disease lookup resolved"
        );
        Ok(info)
    }
}

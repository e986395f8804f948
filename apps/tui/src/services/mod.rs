// Service seams for everything the client delegates to other systems:
// the maps provider, the disease and prediction APIs, the chat proxy and
// the device location.

pub mod chat;
pub mod disease;
pub mod geolocation;
pub mod google;
pub mod prediction;

use crate::config::AppConfig;
use crate::domain::{Coordinate, DiseaseInfo, Place, PlaceCategory, RouteSummary};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded with HTTP {0}")]
    Status(u16),
    #[error("provider returned status {0}")]
    Provider(String),
    #[error("no result for {0:?}")]
    NotFound(String),
    #[error("location permission denied")]
    PermissionDenied,
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, ServiceError>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ServiceError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Coordinate, ServiceError>;
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn driving_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteSummary, ServiceError>;
}

#[async_trait]
pub trait DiseaseService: Send + Sync {
    async fn lookup(&self, disease: &str) -> Result<DiseaseInfo, ServiceError>;
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, description: &str) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ServiceError>;
}

/// The full set of collaborators the client talks to.
#[derive(Clone)]
pub struct Services {
    pub geolocator: Arc<dyn Geolocator>,
    pub places: Arc<dyn PlacesProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub directions: Arc<dyn DirectionsProvider>,
    pub disease: Arc<dyn DiseaseService>,
    pub prediction: Arc<dyn PredictionService>,
    pub chat: Arc<dyn ChatService>,
}

impl Services {
    /// Wires the HTTP implementations from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("medassist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.maps_api_key.is_none() {
            tracing::warn!("GOOGLE_MAPS_API_KEY is not set; maps requests will be denied");
        }

        let maps = Arc::new(google::GoogleMapsClient::new(
            http.clone(),
            config.maps_base_url.clone(),
            config.maps_api_key.clone().unwrap_or_default(),
        ));

        Ok(Self {
            geolocator: Arc::new(geolocation::ConfiguredLocation::new(config.device_location)),
            places: maps.clone(),
            geocoder: maps.clone(),
            directions: maps,
            disease: Arc::new(disease::HttpDiseaseService::new(
                http.clone(),
                config.disease_api_url.clone(),
            )),
            prediction: Arc::new(prediction::HttpPredictionService::new(
                http.clone(),
                config.prediction_api_url.clone(),
            )),
            chat: Arc::new(chat::ChatProxyClient::new(http, config.chat_api_url.clone())),
        })
    }
}

pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub(crate) fn ensure_success(response: &reqwest::Response) -> Result<(), ServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ServiceError::Status(status.as_u16()))
    }
}

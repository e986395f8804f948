use super::{Geolocator, ServiceError};
use crate::domain::Coordinate;
use async_trait::async_trait;

/// Device position taken from configuration. A terminal has no permission
/// prompt, so an unset position is reported as a denial.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    position: Option<Coordinate>,
}

impl ConfiguredLocation {
    pub const fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coordinate, ServiceError> {
        match self.position {
            Some(position) => {
                tracing::info!(lat = position.lat, lng = position.lng, "device location resolved");
                Ok(position)
            }
            None => {
                tracing::warn!("no device location configured");
                Err(ServiceError::PermissionDenied)
            }
        }
    }
}

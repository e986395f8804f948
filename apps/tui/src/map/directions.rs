use crate::domain::{Coordinate, Place, RouteSummary};
use crate::map::{DIRECTIONS_FAILED_MESSAGE, GEOLOCATION_FAILED_MESSAGE};
use crate::services::{DirectionsProvider, ServiceError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("no origin: current location is unknown")]
    NoOrigin,
    #[error("route request failed: {0}")]
    Failed(#[from] ServiceError),
}

impl DirectionsError {
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NoOrigin => GEOLOCATION_FAILED_MESSAGE,
            Self::Failed(_) => DIRECTIONS_FAILED_MESSAGE,
        }
    }
}

/// Requests a single driving route from the current origin to a place.
#[derive(Clone)]
pub struct RoutePlanner {
    directions: Arc<dyn DirectionsProvider>,
}

impl RoutePlanner {
    pub fn new(directions: Arc<dyn DirectionsProvider>) -> Self {
        Self { directions }
    }

    pub async fn plan(
        &self,
        origin: Option<Coordinate>,
        destination: &Place,
    ) -> Result<RouteSummary, DirectionsError> {
        let origin = origin.ok_or(DirectionsError::NoOrigin)?;
        let route = self
            .directions
            .driving_route(origin, destination.location)
            .await?;
        tracing::info!(
            place = %destination.name,
            distance = %route.distance_text,
            duration = %route.duration_text,
            "route computed"
        );
        Ok(route)
    }
}

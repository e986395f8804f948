use crate::domain::{Coordinate, Place, PlaceCategory};
use crate::map::{LOCATION_NOT_FOUND_MESSAGE, SEARCH_FAILED_MESSAGE};
use crate::services::{Geocoder, PlacesProvider, ServiceError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search center {0} is not a valid coordinate")]
    InvalidCenter(Coordinate),
    #[error("could not resolve location {query:?}: {source}")]
    Geocoding {
        query: String,
        #[source]
        source: ServiceError,
    },
}

impl SearchError {
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCenter(_) => SEARCH_FAILED_MESSAGE,
            Self::Geocoding { .. } => LOCATION_NOT_FOUND_MESSAGE,
        }
    }
}

/// Outcome of a search started from free text.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSearch {
    pub center: Coordinate,
    pub places: Vec<Place>,
}

/// Runs the categorized nearby searches and merges their batches.
#[derive(Clone)]
pub struct PlaceSearch {
    places: Arc<dyn PlacesProvider>,
    geocoder: Arc<dyn Geocoder>,
    radius_m: u32,
}

impl PlaceSearch {
    pub fn new(places: Arc<dyn PlacesProvider>, geocoder: Arc<dyn Geocoder>, radius_m: u32) -> Self {
        Self {
            places,
            geocoder,
            radius_m,
        }
    }

    pub const fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// Searches facilities and pharmacies around `center` concurrently.
    /// The result lists facilities first, then pharmacies, each in provider
    /// order. A failing category contributes nothing.
    pub async fn search(&self, center: Coordinate) -> Result<Vec<Place>, SearchError> {
        if !center.is_valid() {
            return Err(SearchError::InvalidCenter(center));
        }

        let (facilities, pharmacies) = tokio::join!(
            self.category(center, PlaceCategory::Facility),
            self.category(center, PlaceCategory::Pharmacy),
        );

        let mut merged = facilities;
        merged.extend(pharmacies);
        tracing::info!(
            lat = center.lat,
            lng = center.lng,
            radius_m = self.radius_m,
            results = merged.len(),
            "nearby search finished"
        );
        Ok(merged)
    }

    /// Geocodes `query`, then searches around the resolved coordinate.
    pub async fn search_address(&self, query: &str) -> Result<LocatedSearch, SearchError> {
        let center = self
            .geocoder
            .geocode(query)
            .await
            .map_err(|source| SearchError::Geocoding {
                query: query.to_string(),
                source,
            })?;
        let places = self.search(center).await?;
        Ok(LocatedSearch { center, places })
    }

    async fn category(&self, center: Coordinate, category: PlaceCategory) -> Vec<Place> {
        match self.places.nearby(center, self.radius_m, category).await {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!(category = category.as_str(), error = %err, "category search failed");
                Vec::new()
            }
        }
    }
}

use super::{
    endpoint, ensure_success, DirectionsProvider, Geocoder, PlacesProvider, ServiceError,
};
use crate::domain::{Coordinate, Place, PlaceCategory, RouteSummary};
use crate::map::polyline;
use async_trait::async_trait;
use serde::Deserialize;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Self::new(value.lat, value.lng)
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: String,
    rating: Option<f32>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: TextValue,
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct Route {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
}

/// Google Maps web-service client covering Places Nearby Search, Geocoding
/// and Directions.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleMapsClient {
    pub const fn new(http: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ServiceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(endpoint(&self.base_url, path))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        ensure_success(&response)?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ServiceError> {
        let body: NearbyResponse = self
            .get(
                "place/nearbysearch/json",
                &[
                    ("location", center.as_query()),
                    ("radius", radius_m.to_string()),
                    ("type", category.provider_type().to_string()),
                ],
            )
            .await?;
        places_from_response(body, category)
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, query: &str) -> Result<Coordinate, ServiceError> {
        let body: GeocodeResponse = self
            .get("geocode/json", &[("address", query.to_string())])
            .await?;
        coordinate_from_response(body, query)
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMapsClient {
    async fn driving_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteSummary, ServiceError> {
        let body: DirectionsResponse = self
            .get(
                "directions/json",
                &[
                    ("origin", origin.as_query()),
                    ("destination", destination.as_query()),
                    ("mode", "driving".to_string()),
                ],
            )
            .await?;
        route_from_response(body)
    }
}

fn places_from_response(
    body: NearbyResponse,
    category: PlaceCategory,
) -> Result<Vec<Place>, ServiceError> {
    match body.status.as_str() {
        STATUS_OK | STATUS_ZERO_RESULTS => Ok(body
            .results
            .into_iter()
            .map(|result| Place {
                id: result.place_id,
                name: result.name,
                vicinity: result.vicinity,
                rating: result.rating,
                location: result.geometry.location.into(),
                category,
            })
            .collect()),
        other => Err(ServiceError::Provider(other.to_string())),
    }
}

fn coordinate_from_response(body: GeocodeResponse, query: &str) -> Result<Coordinate, ServiceError> {
    match body.status.as_str() {
        STATUS_OK => body
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location.into())
            .ok_or_else(|| ServiceError::NotFound(query.to_string())),
        STATUS_ZERO_RESULTS => Err(ServiceError::NotFound(query.to_string())),
        other => Err(ServiceError::Provider(other.to_string())),
    }
}

fn route_from_response(body: DirectionsResponse) -> Result<RouteSummary, ServiceError> {
    if body.status != STATUS_OK {
        return Err(ServiceError::Provider(body.status));
    }
    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Malformed("directions response without routes".into()))?;
    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Malformed("route without legs".into()))?;
    let path = polyline::decode(&route.overview_polyline.points)
        .map_err(|err| ServiceError::Malformed(err.to_string()))?;

    Ok(RouteSummary {
        distance_text: leg.distance.text,
        duration_text: leg.duration.text,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_results_become_tagged_places() {
        let body: NearbyResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [
                    {"place_id": "a", "name": "City Hospital", "vicinity": "MG Road", "rating": 4.2,
                     "geometry": {"location": {"lat": 19.1, "lng": 72.8}}},
                    {"place_id": "b", "name": "Clinic", "geometry": {"location": {"lat": 19.2, "lng": 72.9}}}
                ]
            }"#,
        )
        .unwrap();

        let places = places_from_response(body, PlaceCategory::Facility).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].rating, Some(4.2));
        assert_eq!(places[1].vicinity, "");
        assert!(places.iter().all(|p| p.category == PlaceCategory::Facility));
    }

    #[test]
    fn zero_results_is_an_empty_success() {
        let body: NearbyResponse = serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).unwrap();
        assert!(places_from_response(body, PlaceCategory::Pharmacy).unwrap().is_empty());
    }

    #[test]
    fn denied_request_is_a_provider_error() {
        let body: NearbyResponse =
            serde_json::from_str(r#"{"status": "REQUEST_DENIED", "results": []}"#).unwrap();
        let err = places_from_response(body, PlaceCategory::Pharmacy).unwrap_err();
        assert!(matches!(err, ServiceError::Provider(status) if status == "REQUEST_DENIED"));
    }

    #[test]
    fn geocode_zero_results_is_not_found() {
        let body: GeocodeResponse = serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).unwrap();
        assert!(matches!(
            coordinate_from_response(body, "nowhere"),
            Err(ServiceError::NotFound(q)) if q == "nowhere"
        ));
    }

    #[test]
    fn directions_produce_distance_duration_and_path() {
        let body: DirectionsResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "routes": [{
                    "legs": [{"distance": {"text": "3.4 km", "value": 3400},
                              "duration": {"text": "12 mins", "value": 720}}],
                    "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"}
                }]
            }"#,
        )
        .unwrap();

        let route = route_from_response(body).unwrap();
        assert_eq!(route.distance_text, "3.4 km");
        assert_eq!(route.duration_text, "12 mins");
        assert_eq!(route.path.len(), 3);
    }
}

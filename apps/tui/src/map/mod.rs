// Map, place search and directions orchestration for the Nearby page.

pub mod directions;
pub mod polyline;
pub mod search;
pub mod view;

pub use directions::{DirectionsError, RoutePlanner};
pub use search::{LocatedSearch, PlaceSearch, SearchError};
pub use view::{InfoWindow, MapView, MarkerDiff, MarkerId, MarkerKind, PlacePin};

pub const GEOLOCATION_FAILED_MESSAGE: &str = "Unable to retrieve your location.";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search nearby places. Please try again.";
pub const LOCATION_NOT_FOUND_MESSAGE: &str = "Location not found. Please try again.";
pub const DIRECTIONS_FAILED_MESSAGE: &str = "Failed to get directions. Please try again.";

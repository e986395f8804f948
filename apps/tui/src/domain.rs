use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(self, other: Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }

    /// Local east/north offset from `origin` in kilometres.
    pub fn offset_km_from(self, origin: Self) -> (f64, f64) {
        let x = (self.lng - origin.lng).to_radians() * origin.lat.to_radians().cos() * EARTH_RADIUS_KM;
        let y = (self.lat - origin.lat).to_radians() * EARTH_RADIUS_KM;
        (x, y)
    }

    /// Query-string form expected by the maps web services.
    pub fn as_query(self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Facility,
    Pharmacy,
}

impl PlaceCategory {
    pub const ALL: [Self; 2] = [Self::Facility, Self::Pharmacy];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facility => "facility",
            Self::Pharmacy => "pharmacy",
        }
    }

    /// Place type understood by the nearby-search provider.
    pub const fn provider_type(self) -> &'static str {
        match self {
            Self::Facility => "hospital",
            Self::Pharmacy => "pharmacy",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Facility),
            1 => Some(Self::Pharmacy),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "facility" | "hospital" => Some(Self::Facility),
            "pharmacy" => Some(Self::Pharmacy),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Facility => "Medical Facility",
            Self::Pharmacy => "Pharmacy",
        }
    }

    pub const fn offers_booking(self) -> bool {
        matches!(self, Self::Facility)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub vicinity: String,
    pub rating: Option<f32>,
    pub location: Coordinate,
    pub category: PlaceCategory,
}

/// Response body of the disease service. Field names follow its JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseInfo {
    pub prevention: Vec<String>,
    pub medicines: Vec<String>,
    pub home_remedies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance_text: String,
    pub duration_text: String,
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// A booking request as entered in the form. Values are kept as typed;
/// [`crate::booking::form::validate`] turns them into a checked appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub hospital: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_mobile: String,
    pub purpose: String,
    pub date: String,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_index_and_parse() {
        for (index, category) in PlaceCategory::ALL.iter().enumerate() {
            assert_eq!(PlaceCategory::from_index(index), Some(*category));
            assert_eq!(PlaceCategory::parse(category.as_str()), Some(*category));
        }
        assert_eq!(PlaceCategory::parse(" Hospital "), Some(PlaceCategory::Facility));
        assert_eq!(PlaceCategory::from_index(2), None);
    }

    #[test]
    fn only_facilities_offer_booking() {
        assert!(PlaceCategory::Facility.offers_booking());
        assert!(!PlaceCategory::Pharmacy.offers_booking());
    }

    #[test]
    fn distance_between_known_cities() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1278);
        let km = paris.distance_km(london);
        assert!((km - 343.5).abs() < 2.0, "got {km}");
    }

    #[test]
    fn validity_rejects_out_of_range() {
        assert!(Coordinate::new(19.13, 72.84).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn disease_info_uses_camel_case_wire_names() {
        let json = r#"{"prevention":["wash hands"],"medicines":["paracetamol"],"homeRemedies":["rest"]}"#;
        let info: DiseaseInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.home_remedies, vec!["rest".to_string()]);
    }
}

use crate::booking::{Appointment, BookingMachine, FormField};
use crate::domain::{AppointmentForm, ChatMessage, Coordinate, DiseaseInfo, Place, RouteSummary};
use crate::map::{
    DirectionsError, LocatedSearch, MapView, MarkerDiff, MarkerId, PlacePin, SearchError,
    GEOLOCATION_FAILED_MESSAGE,
};
use crate::services::ServiceError;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::PathBuf;
use tokio::task::JoinHandle;

pub const DISEASE_NOT_FOUND_MESSAGE: &str = "Disease not found.";
pub const PREDICTION_FAILED_MESSAGE: &str = "An error occurred. Please try again.";
pub const CHAT_UNAVAILABLE_MESSAGE: &str = "Unable to reach the chat service. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error,
    Success,
}

impl LoadState {
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Disease lookup page.
#[derive(Debug, Default)]
pub struct RecommendPage {
    pub query: String,
    pub disease_info: Option<DiseaseInfo>,
    pub error: Option<String>,
    pub status: LoadState,
}

impl RecommendPage {
    pub fn begin_lookup(&mut self) -> Option<String> {
        let query = self.query.trim();
        if query.is_empty() || self.status.is_loading() {
            return None;
        }
        self.status = LoadState::Loading;
        Some(query.to_string())
    }

    pub fn apply_lookup(&mut self, result: Result<DiseaseInfo, ServiceError>) {
        match result {
            Ok(info) => {
                self.disease_info = Some(info);
                self.error = None;
                self.status = LoadState::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, query = %self.query, "disease lookup failed");
                self.disease_info = None;
                self.error = Some(DISEASE_NOT_FOUND_MESSAGE.to_string());
                self.status = LoadState::Error;
            }
        }
    }
}

/// Symptom-based prediction page.
#[derive(Debug, Default)]
pub struct PredictionPage {
    pub description: String,
    pub response: Option<String>,
    pub error: Option<String>,
    pub status: LoadState,
}

impl PredictionPage {
    pub fn begin_prediction(&mut self) -> Option<String> {
        let description = self.description.trim();
        if description.is_empty() || self.status.is_loading() {
            return None;
        }
        self.status = LoadState::Loading;
        Some(description.to_string())
    }

    pub fn apply_prediction(&mut self, result: Result<String, ServiceError>) {
        match result {
            Ok(text) => {
                self.response = Some(text);
                self.error = None;
                self.status = LoadState::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction failed");
                self.response = None;
                self.error = Some(PREDICTION_FAILED_MESSAGE.to_string());
                self.status = LoadState::Error;
            }
        }
    }
}

/// Chatbot conversation page.
#[derive(Debug, Default)]
pub struct ChatPage {
    pub input: String,
    pub messages: Vec<ChatMessage>,
    pub status: LoadState,
}

impl ChatPage {
    pub fn begin_send(&mut self) -> Option<String> {
        let message = self.input.trim().to_string();
        if message.is_empty() || self.status.is_loading() {
            return None;
        }
        self.messages.push(ChatMessage::user(message.clone()));
        self.input.clear();
        self.status = LoadState::Loading;
        Some(message)
    }

    pub fn apply_reply(&mut self, result: Result<String, ServiceError>) {
        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply));
                self.status = LoadState::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                self.messages.push(ChatMessage::assistant(CHAT_UNAVAILABLE_MESSAGE));
                self.status = LoadState::Error;
            }
        }
    }
}

/// Nearby care page: map, place list and directions.
#[derive(Debug)]
pub struct NearbyPage {
    pub map: MapView,
    pub origin: Option<Coordinate>,
    pub selected: usize,
    pub location_input: String,
    pub editing_location: bool,
    pub filter: String,
    pub filtering: bool,
    pub error: Option<String>,
    pub geolocation_error: Option<String>,
    pub status: LoadState,
    pub route_status: LoadState,
    search_generation: u64,
    route_generation: u64,
    search_task: Option<JoinHandle<()>>,
}

impl NearbyPage {
    pub fn new(center: Coordinate, radius_m: u32) -> Self {
        Self {
            map: MapView::new(center, radius_m),
            origin: None,
            selected: 0,
            location_input: String::new(),
            editing_location: false,
            filter: String::new(),
            filtering: false,
            error: None,
            geolocation_error: None,
            status: LoadState::Idle,
            route_status: LoadState::Idle,
            search_generation: 0,
            route_generation: 0,
            search_task: None,
        }
    }

    pub const fn search_generation(&self) -> u64 {
        self.search_generation
    }

    pub fn apply_location(&mut self, result: Result<Coordinate, ServiceError>) {
        match result {
            Ok(position) => {
                self.origin = Some(position);
                self.map.set_current_location(position);
                self.geolocation_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                self.geolocation_error = Some(GEOLOCATION_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Starts a new search generation, cancelling the one in flight.
    pub fn begin_search(&mut self) -> u64 {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.search_generation += 1;
        // Directions still in flight point at the batch being replaced.
        self.route_generation += 1;
        if self.route_status.is_loading() {
            self.route_status = LoadState::Idle;
        }
        self.status = LoadState::Loading;
        self.error = None;
        self.search_generation
    }

    pub fn track_search(&mut self, task: JoinHandle<()>) {
        self.search_task = Some(task);
    }

    /// Applies a finished search. Outcomes from older generations are
    /// dropped and `None` is returned.
    pub fn apply_search(
        &mut self,
        generation: u64,
        result: Result<LocatedSearch, SearchError>,
    ) -> Option<MarkerDiff> {
        if generation != self.search_generation {
            tracing::debug!(generation, current = self.search_generation, "dropping stale search");
            return None;
        }
        self.search_task = None;

        match result {
            Ok(located) => {
                self.map.recenter(located.center);
                let diff = self.map.reconcile(located.places);
                self.selected = 0;
                self.status = LoadState::Success;
                self.error = None;
                Some(diff)
            }
            Err(err) => {
                tracing::warn!(error = %err, "nearby search failed");
                self.status = LoadState::Error;
                self.error = Some(err.user_message().to_string());
                None
            }
        }
    }

    /// Indices into `map.pins()` that match the current filter, best match
    /// first. With an empty filter every pin is visible in display order.
    pub fn visible_pins(&self) -> Vec<usize> {
        let pins = self.map.pins();
        let pattern = self.filter.trim();
        if pattern.is_empty() {
            return (0..pins.len()).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = pins
            .iter()
            .enumerate()
            .filter_map(|(index, pin)| {
                let haystack = format!("{} {}", pin.place.name, pin.place.vicinity);
                matcher
                    .fuzzy_match(&haystack, pattern)
                    .map(|score| (score, index))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }

    pub fn selected_pin(&self) -> Option<&PlacePin> {
        let visible = self.visible_pins();
        visible
            .get(self.selected)
            .and_then(|index| self.map.pins().get(*index))
    }

    /// Opens the info window for the selected place and starts a new route
    /// generation. Returns what the directions request needs.
    pub fn begin_route(&mut self) -> Option<(u64, MarkerId, Place)> {
        let pin = self.selected_pin()?;
        let id = pin.id.clone();
        let place = pin.place.clone();
        self.map.open_info_window(&id, None);
        self.route_generation += 1;
        self.route_status = LoadState::Loading;
        Some((self.route_generation, id, place))
    }

    pub fn apply_route(
        &mut self,
        generation: u64,
        destination: MarkerId,
        result: Result<RouteSummary, DirectionsError>,
    ) {
        if generation != self.route_generation || self.map.pin(&destination).is_none() {
            tracing::debug!(generation, "dropping route for a place no longer shown");
            return;
        }
        match result {
            Ok(summary) => {
                self.map.open_info_window(&destination, Some(&summary));
                self.map.show_route(destination, summary);
                self.route_status = LoadState::Success;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "directions failed");
                self.route_status = LoadState::Error;
                self.error = Some(err.user_message().to_string());
            }
        }
    }
}

/// Book appointment page.
#[derive(Debug, Default)]
pub struct BookingPage {
    pub form: AppointmentForm,
    pub field: Option<FormField>,
    pub error: Option<String>,
    pub machine: BookingMachine,
    pub pending: Option<Appointment>,
    pub receipt_path: Option<PathBuf>,
}

impl BookingPage {
    pub fn for_hospital(hospital: &str) -> Self {
        Self {
            form: AppointmentForm {
                hospital: hospital.to_string(),
                ..AppointmentForm::default()
            },
            field: Some(FormField::PatientName),
            ..Self::default()
        }
    }

    pub fn focused(&self) -> FormField {
        self.field.unwrap_or(FormField::PatientName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlaceCategory;
    use crate::map::{DIRECTIONS_FAILED_MESSAGE, LOCATION_NOT_FOUND_MESSAGE};
    use pretty_assertions::assert_eq;

    fn info() -> DiseaseInfo {
        DiseaseInfo {
            prevention: vec!["Get vaccinated".into()],
            medicines: vec!["Oseltamivir".into()],
            home_remedies: vec!["Rest".into(), "Fluids".into()],
        }
    }

    fn place(id: &str, name: &str, category: PlaceCategory) -> Place {
        Place {
            id: id.into(),
            name: name.into(),
            vicinity: "Main Street".into(),
            rating: Some(4.5),
            location: Coordinate::new(19.01, 72.81),
            category,
        }
    }

    fn located(places: Vec<Place>) -> Result<LocatedSearch, SearchError> {
        Ok(LocatedSearch {
            center: Coordinate::new(19.0, 72.8),
            places,
        })
    }

    fn route() -> RouteSummary {
        RouteSummary {
            distance_text: "2.3 km".into(),
            duration_text: "8 mins".into(),
            path: vec![Coordinate::new(19.0, 72.8), Coordinate::new(19.01, 72.81)],
        }
    }

    #[test]
    fn successful_lookup_replaces_info_and_clears_error() {
        let mut page = RecommendPage {
            error: Some(DISEASE_NOT_FOUND_MESSAGE.into()),
            ..RecommendPage::default()
        };
        page.apply_lookup(Ok(info()));
        assert_eq!(page.disease_info, Some(info()));
        assert_eq!(page.error, None);
        assert_eq!(page.status, LoadState::Success);
    }

    #[test]
    fn failed_lookup_clears_info_and_sets_fixed_error() {
        let mut page = RecommendPage::default();
        page.apply_lookup(Ok(info()));
        page.apply_lookup(Err(ServiceError::NotFound("xyz".into())));
        assert_eq!(page.disease_info, None);
        assert_eq!(page.error.as_deref(), Some("Disease not found."));
    }

    #[test]
    fn prediction_failure_uses_generic_message() {
        let mut page = PredictionPage {
            description: "fever, headache".into(),
            ..PredictionPage::default()
        };
        assert_eq!(page.begin_prediction().as_deref(), Some("fever, headache"));
        assert!(page.begin_prediction().is_none(), "no second request while loading");
        page.apply_prediction(Err(ServiceError::Status(500)));
        assert_eq!(page.error.as_deref(), Some(PREDICTION_FAILED_MESSAGE));
    }

    #[test]
    fn chat_keeps_turns_in_order() {
        let mut page = ChatPage {
            input: "hello".into(),
            ..ChatPage::default()
        };
        assert_eq!(page.begin_send().as_deref(), Some("hello"));
        assert!(page.input.is_empty());
        page.apply_reply(Ok("Hi - there".into()));

        assert_eq!(
            page.messages,
            vec![ChatMessage::user("hello"), ChatMessage::assistant("Hi - there")]
        );
    }

    #[test]
    fn blank_chat_input_is_not_sent() {
        let mut page = ChatPage {
            input: "   ".into(),
            ..ChatPage::default()
        };
        assert!(page.begin_send().is_none());
        assert!(page.messages.is_empty());
    }

    #[test]
    fn geolocation_failure_is_reported_once_and_kept() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        page.apply_location(Err(ServiceError::PermissionDenied));
        assert_eq!(page.geolocation_error.as_deref(), Some(GEOLOCATION_FAILED_MESSAGE));
        assert!(page.origin.is_none());
        assert!(page.map.current_location().is_none());
    }

    #[test]
    fn search_shows_sum_of_both_categories() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(
            generation,
            located(vec![
                place("h1", "Apollo", PlaceCategory::Facility),
                place("h2", "Fortis", PlaceCategory::Facility),
                place("p1", "MedPlus", PlaceCategory::Pharmacy),
            ]),
        );
        assert_eq!(page.map.pins().len(), 3);
        assert_eq!(page.status, LoadState::Success);
        assert_eq!(page.map.center(), Coordinate::new(19.0, 72.8));
    }

    #[test]
    fn new_address_search_replaces_every_old_marker() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let first = page.begin_search();
        page.apply_search(
            first,
            located(vec![
                place("h1", "Apollo", PlaceCategory::Facility),
                place("p1", "MedPlus", PlaceCategory::Pharmacy),
            ]),
        );

        let second = page.begin_search();
        let diff = page
            .apply_search(second, located(vec![place("h9", "Lilavati", PlaceCategory::Facility)]))
            .unwrap();

        assert_eq!(diff.removed, 2);
        let old_visible = page
            .map
            .pins()
            .iter()
            .filter(|pin| pin.place.id == "h1" || pin.place.id == "p1")
            .count();
        assert_eq!(old_visible, 0);
    }

    #[test]
    fn stale_search_outcome_is_ignored() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let stale = page.begin_search();
        let current = page.begin_search();

        assert!(page
            .apply_search(stale, located(vec![place("old", "Old", PlaceCategory::Facility)]))
            .is_none());
        assert!(page.map.pins().is_empty());
        assert_eq!(page.status, LoadState::Loading);

        page.apply_search(current, located(vec![place("new", "New", PlaceCategory::Facility)]));
        assert_eq!(page.map.pins()[0].place.id, "new");
    }

    #[test]
    fn failed_geocode_keeps_markers_and_shows_message() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("h1", "Apollo", PlaceCategory::Facility)]));

        let generation = page.begin_search();
        page.apply_search(
            generation,
            Err(SearchError::Geocoding {
                query: "nowhere".into(),
                source: ServiceError::NotFound("nowhere".into()),
            }),
        );
        assert_eq!(page.error.as_deref(), Some(LOCATION_NOT_FOUND_MESSAGE));
        assert_eq!(page.map.pins().len(), 1);
    }

    #[test]
    fn filter_narrows_list_but_not_markers() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(
            generation,
            located(vec![
                place("h1", "Apollo Hospital", PlaceCategory::Facility),
                place("p1", "MedPlus Pharmacy", PlaceCategory::Pharmacy),
            ]),
        );

        page.filter = "medp".into();
        let visible = page.visible_pins();
        assert_eq!(visible, vec![1]);
        assert_eq!(page.map.pins().len(), 2);
        assert_eq!(page.selected_pin().unwrap().place.id, "p1");
    }

    #[test]
    fn successful_route_renders_one_overlay_and_route_text() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(
            generation,
            located(vec![
                place("h1", "Apollo", PlaceCategory::Facility),
                place("h2", "Fortis", PlaceCategory::Facility),
            ]),
        );

        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(generation, id, Ok(route()));
        assert_eq!(page.map.overlay_count(), 1);

        page.selected = 1;
        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(generation, id.clone(), Ok(route()));
        assert_eq!(page.map.overlay_count(), 1);
        assert_eq!(page.map.route().unwrap().destination, id);

        let window = page.map.info_window().unwrap();
        assert!(window.lines.contains(&"Distance: 2.3 km".to_string()));
        assert!(window.book_action);
    }

    #[test]
    fn failed_route_leaves_overlay_untouched() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("h1", "Apollo", PlaceCategory::Facility)]));

        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(generation, id, Ok(route()));

        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(
            generation,
            id,
            Err(DirectionsError::Failed(ServiceError::Provider("ZERO_RESULTS".into()))),
        );

        assert_eq!(page.map.overlay_count(), 1);
        assert_eq!(page.error.as_deref(), Some(DIRECTIONS_FAILED_MESSAGE));
    }

    #[test]
    fn new_batch_drops_route_to_a_removed_place() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("old", "Old", PlaceCategory::Facility)]));
        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(generation, id, Ok(route()));
        assert_eq!(page.map.overlay_count(), 1);

        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("new", "New", PlaceCategory::Facility)]));

        assert!(page.map.route().is_none());
        assert!(page.map.info_window().is_none());
    }

    #[test]
    fn route_for_a_replaced_batch_is_discarded() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("old", "Old", PlaceCategory::Facility)]));
        let (route_generation, id, _) = page.begin_route().unwrap();

        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("new", "New", PlaceCategory::Facility)]));
        page.apply_route(route_generation, id, Ok(route()));

        assert!(page.map.route().is_none());
        assert!(page.map.info_window().is_none());
        assert!(!page.route_status.is_loading());
        let ids: Vec<&str> = page.map.pins().iter().map(|pin| pin.place.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn route_kept_when_destination_survives_the_batch() {
        let mut page = NearbyPage::new(Coordinate::new(0.0, 0.0), 5000);
        let generation = page.begin_search();
        page.apply_search(generation, located(vec![place("h1", "Apollo", PlaceCategory::Facility)]));
        let (generation, id, _) = page.begin_route().unwrap();
        page.apply_route(generation, id.clone(), Ok(route()));

        let generation = page.begin_search();
        page.apply_search(
            generation,
            located(vec![
                place("h1", "Apollo", PlaceCategory::Facility),
                place("p1", "MedPlus", PlaceCategory::Pharmacy),
            ]),
        );

        assert_eq!(page.map.route().unwrap().destination, id);
    }

    #[test]
    fn blank_or_repeated_lookup_is_not_sent() {
        let mut page = RecommendPage {
            query: "   ".into(),
            ..RecommendPage::default()
        };
        assert_eq!(page.begin_lookup(), None);
        assert_eq!(page.status, LoadState::Idle);

        page.query = " flu ".into();
        assert_eq!(page.begin_lookup().as_deref(), Some("flu"));
        assert_eq!(page.begin_lookup(), None);

        page.apply_lookup(Ok(info()));
        assert_eq!(page.begin_lookup().as_deref(), Some("flu"));
    }

    #[test]
    fn booking_page_starts_on_first_field_with_hospital() {
        let page = BookingPage::for_hospital("Apollo");
        assert_eq!(page.form.hospital, "Apollo");
        assert_eq!(page.focused(), FormField::PatientName);
    }
}

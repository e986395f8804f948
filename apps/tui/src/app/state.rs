use crate::app::actions::{AppActions, TaskOutcome};
use crate::app::pages::{BookingPage, ChatPage, NearbyPage, PredictionPage, RecommendPage};
use crate::booking::{self, BookingEvent, BOOKED_MESSAGE};
use crate::config::AppConfig;
use crate::domain::Coordinate;
use crate::map::GEOLOCATION_FAILED_MESSAGE;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

/// Shown until a device location is known.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate::new(19.138_978, 72.839_731);
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
const THROBBER_STEP: Duration = Duration::from_millis(120);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Home,
    Prediction,
    Chatbot,
    Recommend,
    Nearby,
    BookAppointment,
}

impl AppScreen {
    /// Pages reachable from the home menu, in menu order.
    pub const MENU: [Self; 4] = [Self::Prediction, Self::Chatbot, Self::Recommend, Self::Nearby];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Prediction => "Disease Prediction",
            Self::Chatbot => "Health Chatbot",
            Self::Recommend => "Disease Recommendations",
            Self::Nearby => "Nearby Hospitals & Pharmacies",
            Self::BookAppointment => "Book Appointment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Work to run when a toast closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastAction {
    WriteReceipt,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
    pub on_close: Option<ToastAction>,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub menu_index: usize,
    pub show_help: bool,
    pub status_message: String,
    pub recommend: RecommendPage,
    pub prediction: PredictionPage,
    pub chat: ChatPage,
    pub nearby: NearbyPage,
    pub booking: BookingPage,
    pub toast: Option<Toast>,
    pub throbber: ThrobberState,
    pub receipt_dir: PathBuf,
    pub actions: AppActions,
    last_tick: Instant,
}

impl App {
    pub fn new(actions: AppActions, config: &AppConfig) -> Self {
        let center = config.device_location.unwrap_or(DEFAULT_MAP_CENTER);
        Self {
            running: true,
            screen: AppScreen::Home,
            menu_index: 0,
            show_help: false,
            status_message: String::new(),
            recommend: RecommendPage::default(),
            prediction: PredictionPage::default(),
            chat: ChatPage::default(),
            nearby: NearbyPage::new(center, config.search_radius_m),
            booking: BookingPage::default(),
            toast: None,
            throbber: ThrobberState::default(),
            receipt_dir: config.receipt_dir.clone(),
            actions,
            last_tick: Instant::now(),
        }
    }

    /// Requests the device location once, when the UI comes up.
    pub fn mount(&mut self) {
        self.actions.locate();
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        if now.duration_since(self.last_tick) >= THROBBER_STEP {
            self.throbber.calc_next();
            self.last_tick = now;
        }

        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.close_toast();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.recommend.status.is_loading()
            || self.prediction.status.is_loading()
            || self.chat.status.is_loading()
            || self.nearby.status.is_loading()
            || self.nearby.route_status.is_loading()
    }

    pub fn apply_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Located(result) => self.nearby.apply_location(result),
            TaskOutcome::Search { generation, result } => {
                self.nearby.apply_search(generation, result);
            }
            TaskOutcome::Route {
                generation,
                destination,
                result,
            } => self.nearby.apply_route(generation, destination, result),
            TaskOutcome::Disease(result) => self.recommend.apply_lookup(result),
            TaskOutcome::Prediction(result) => self.prediction.apply_prediction(result),
            TaskOutcome::Chat(result) => self.chat.apply_reply(result),
        }
    }

    pub fn open_screen(&mut self, screen: AppScreen) {
        self.status_message.clear();
        self.screen = screen;
    }

    pub fn submit_disease_lookup(&mut self) {
        if let Some(query) = self.recommend.begin_lookup() {
            self.actions.lookup_disease(query);
        }
    }

    pub fn submit_prediction(&mut self) {
        if let Some(description) = self.prediction.begin_prediction() {
            self.actions.predict(description);
        }
    }

    pub fn send_chat(&mut self) {
        if let Some(message) = self.chat.begin_send() {
            self.actions.send_chat(message);
        }
    }

    /// Searches around the device location.
    pub fn search_near_me(&mut self) {
        let Some(origin) = self.nearby.origin else {
            self.nearby.error = Some(GEOLOCATION_FAILED_MESSAGE.to_string());
            return;
        };
        let generation = self.nearby.begin_search();
        let task = self.actions.search_nearby(generation, origin);
        self.nearby.track_search(task);
    }

    /// Geocodes the typed location and searches around it.
    pub fn search_location(&mut self) {
        let query = self.nearby.location_input.trim().to_string();
        if query.is_empty() {
            return;
        }
        let generation = self.nearby.begin_search();
        let task = self.actions.search_address(generation, query);
        self.nearby.track_search(task);
    }

    pub fn request_directions(&mut self) {
        let origin = self.nearby.origin;
        if let Some((generation, id, place)) = self.nearby.begin_route() {
            self.actions.route(generation, origin, id, place);
        }
    }

    /// Opens the booking form for the selected facility.
    pub fn open_booking(&mut self) {
        let Some(pin) = self.nearby.selected_pin() else {
            return;
        };
        if !pin.place.category.offers_booking() {
            self.status_message = "Appointments can only be booked at medical facilities".to_string();
            return;
        }
        self.booking = BookingPage::for_hospital(&pin.place.name);
        self.open_screen(AppScreen::BookAppointment);
    }

    pub fn submit_booking(&mut self) {
        let appointment = match booking::validate(&self.booking.form) {
            Ok(appointment) => appointment,
            Err(err) => {
                self.booking.error = Some(err.to_string());
                return;
            }
        };

        if let Err(err) = self.booking.machine.process(&BookingEvent::Submitted) {
            tracing::debug!(error = %err, "booking submit ignored");
            return;
        }

        tracing::info!(hospital = %appointment.hospital, date = %appointment.date, "appointment booked");
        self.booking.pending = Some(appointment);
        self.booking.error = None;
        self.show_toast(BOOKED_MESSAGE, ToastKind::Success, Some(ToastAction::WriteReceipt));
    }

    pub fn show_toast(&mut self, message: &str, kind: ToastKind, on_close: Option<ToastAction>) {
        self.toast = Some(Toast {
            message: message.to_string(),
            kind,
            expires_at: Instant::now() + TOAST_DURATION,
            on_close,
        });
    }

    /// Closes the visible toast and runs its close action.
    pub fn close_toast(&mut self) {
        let Some(toast) = self.toast.take() else {
            return;
        };
        if toast.on_close == Some(ToastAction::WriteReceipt) {
            self.write_pending_receipt();
        }
    }

    fn write_pending_receipt(&mut self) {
        if let Err(err) = self.booking.machine.process(&BookingEvent::ToastClosed) {
            tracing::warn!(error = %err, "receipt requested outside a confirmed booking");
            return;
        }

        let written = self
            .booking
            .pending
            .take()
            .ok_or_else(|| "no confirmed appointment".to_string())
            .and_then(|appointment| {
                booking::write_receipt(&self.receipt_dir, &appointment).map_err(|e| e.to_string())
            });

        let event = match written {
            Ok(path) => {
                self.status_message = format!("Receipt saved: {}", path.display());
                self.booking.receipt_path = Some(path.clone());
                BookingEvent::ReceiptWritten(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "could not save appointment receipt");
                self.booking.error = Some(format!("Could not save receipt: {err}"));
                BookingEvent::ReceiptFailed(err)
            }
        };

        for event in [event, BookingEvent::Reset] {
            if let Err(err) = self.booking.machine.process(&event) {
                tracing::warn!(error = %err, "booking state out of sync");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::{DiseaseInfo, Place, PlaceCategory, RouteSummary};
    use crate::services::{
        ChatService, DirectionsProvider, DiseaseService, Geocoder, Geolocator, PlacesProvider,
        PredictionService, ServiceError, Services,
    };
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    /// One stub standing in for every collaborator.
    pub struct Offline;

    #[async_trait]
    impl Geolocator for Offline {
        async fn current_position(&self) -> Result<Coordinate, ServiceError> {
            Ok(Coordinate::new(19.0, 72.8))
        }
    }

    #[async_trait]
    impl PlacesProvider for Offline {
        async fn nearby(
            &self,
            center: Coordinate,
            _radius_m: u32,
            category: PlaceCategory,
        ) -> Result<Vec<Place>, ServiceError> {
            Ok(vec![Place {
                id: format!("{}-1", category.as_str()),
                name: format!("Nearest {}", category.label()),
                vicinity: "Nearby".into(),
                rating: None,
                location: center,
                category,
            }])
        }
    }

    #[async_trait]
    impl Geocoder for Offline {
        async fn geocode(&self, query: &str) -> Result<Coordinate, ServiceError> {
            Err(ServiceError::NotFound(query.to_string()))
        }
    }

    #[async_trait]
    impl DirectionsProvider for Offline {
        async fn driving_route(
            &self,
            origin: Coordinate,
            destination: Coordinate,
        ) -> Result<RouteSummary, ServiceError> {
            Ok(RouteSummary {
                distance_text: "1 km".into(),
                duration_text: "3 mins".into(),
                path: vec![origin, destination],
            })
        }
    }

    #[async_trait]
    impl DiseaseService for Offline {
        async fn lookup(&self, _disease: &str) -> Result<DiseaseInfo, ServiceError> {
            Ok(DiseaseInfo::default())
        }
    }

    #[async_trait]
    impl PredictionService for Offline {
        async fn predict(&self, _description: &str) -> Result<String, ServiceError> {
            Ok("Common cold".into())
        }
    }

    #[async_trait]
    impl ChatService for Offline {
        async fn send(&self, message: &str) -> Result<String, ServiceError> {
            Ok(format!("echo: {message}"))
        }
    }

    pub fn offline_services() -> Services {
        let offline = Arc::new(Offline);
        Services {
            geolocator: offline.clone(),
            places: offline.clone(),
            geocoder: offline.clone(),
            directions: offline.clone(),
            disease: offline.clone(),
            prediction: offline.clone(),
            chat: offline,
        }
    }

    pub fn offline_app(receipt_dir: PathBuf) -> (App, UnboundedReceiver<TaskOutcome>) {
        let (tx, rx) = unbounded_channel();
        let config = AppConfig {
            receipt_dir,
            ..AppConfig::default()
        };
        let actions = AppActions::new(offline_services(), config.search_radius_m, tx);
        (App::new(actions, &config), rx)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::offline_app;
    use super::*;
    use crate::booking::BookingState;
    use crate::domain::PlaceCategory;

    fn fill_form(app: &mut App) {
        let form = &mut app.booking.form;
        form.patient_name = "Asha Rao".into();
        form.patient_age = "34".into();
        form.patient_mobile = "9876543210".into();
        form.purpose = "Checkup".into();
        form.date = "2026-11-02".into();
        form.time = "10:00".into();
    }

    #[tokio::test]
    async fn near_me_search_flows_through_the_channel() {
        let (mut app, mut rx) = offline_app(PathBuf::from("unused"));
        app.mount();
        let located = rx.recv().await.unwrap();
        app.apply_outcome(located);
        assert!(app.nearby.origin.is_some());

        app.search_near_me();
        assert!(app.nearby.status.is_loading());
        let outcome = rx.recv().await.unwrap();
        app.apply_outcome(outcome);

        let categories: Vec<PlaceCategory> =
            app.nearby.map.pins().iter().map(|p| p.place.category).collect();
        assert_eq!(categories, vec![PlaceCategory::Facility, PlaceCategory::Pharmacy]);
    }

    #[tokio::test]
    async fn near_me_without_location_shows_geolocation_error() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        app.search_near_me();
        assert_eq!(app.nearby.error.as_deref(), Some(GEOLOCATION_FAILED_MESSAGE));
        assert_eq!(app.nearby.search_generation(), 0);
    }

    #[tokio::test]
    async fn booking_is_offered_only_for_facilities() {
        let (mut app, mut rx) = offline_app(PathBuf::from("unused"));
        app.mount();
        let located = rx.recv().await.unwrap();
        app.apply_outcome(located);
        app.search_near_me();
        let outcome = rx.recv().await.unwrap();
        app.apply_outcome(outcome);

        app.nearby.selected = 1;
        app.open_booking();
        assert_eq!(app.screen, AppScreen::Home);

        app.nearby.selected = 0;
        app.open_booking();
        assert_eq!(app.screen, AppScreen::BookAppointment);
        assert_eq!(app.booking.form.hospital, "Nearest Medical Facility");
    }

    #[tokio::test]
    async fn receipt_is_written_when_the_toast_closes() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut app, _rx) = offline_app(tmp.path().to_path_buf());
        app.booking = BookingPage::for_hospital("City Hospital");
        fill_form(&mut app);

        app.submit_booking();
        assert_eq!(app.booking.machine.state(), BookingState::Confirmed);
        let expires_at = app.toast.as_ref().unwrap().expires_at;
        assert_eq!(app.toast.as_ref().unwrap().message, BOOKED_MESSAGE);

        app.update_at(expires_at - Duration::from_millis(1));
        assert!(app.toast.is_some());
        assert!(app.booking.receipt_path.is_none());

        app.update_at(expires_at);
        assert!(app.toast.is_none());
        let path = app.booking.receipt_path.clone().unwrap();
        assert!(path.exists());
        assert_eq!(app.booking.machine.state(), BookingState::Editing);
    }

    #[tokio::test]
    async fn invalid_form_shows_error_and_no_toast() {
        let (mut app, _rx) = offline_app(PathBuf::from("unused"));
        app.booking = BookingPage::for_hospital("City Hospital");
        app.submit_booking();
        assert_eq!(app.booking.error.as_deref(), Some("Patient Name is required"));
        assert!(app.toast.is_none());
        assert_eq!(app.booking.machine.state(), BookingState::Editing);
    }
}

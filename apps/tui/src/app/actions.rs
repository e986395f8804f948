use crate::domain::{Coordinate, DiseaseInfo, Place, RouteSummary};
use crate::map::{DirectionsError, LocatedSearch, MarkerId, PlaceSearch, RoutePlanner, SearchError};
use crate::services::{ServiceError, Services};
use std::future::Future;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Result of a background request, delivered to the event loop.
#[derive(Debug)]
pub enum TaskOutcome {
    Located(Result<Coordinate, ServiceError>),
    Search {
        generation: u64,
        result: Result<LocatedSearch, SearchError>,
    },
    Route {
        generation: u64,
        destination: MarkerId,
        result: Result<RouteSummary, DirectionsError>,
    },
    Disease(Result<DiseaseInfo, ServiceError>),
    Prediction(Result<String, ServiceError>),
    Chat(Result<String, ServiceError>),
}

/// Spawns service calls on the runtime and reports back through a channel.
#[derive(Clone)]
pub struct AppActions {
    services: Services,
    search: PlaceSearch,
    planner: RoutePlanner,
    outcomes: UnboundedSender<TaskOutcome>,
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions")
            .field("radius_m", &self.search.radius_m())
            .finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(services: Services, radius_m: u32, outcomes: UnboundedSender<TaskOutcome>) -> Self {
        let search = PlaceSearch::new(services.places.clone(), services.geocoder.clone(), radius_m);
        let planner = RoutePlanner::new(services.directions.clone());
        Self {
            services,
            search,
            planner,
            outcomes,
        }
    }

    pub const fn search(&self) -> &PlaceSearch {
        &self.search
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = task.await;
            if outcomes.send(outcome).is_err() {
                tracing::debug!("event loop gone; dropping task outcome");
            }
        })
    }

    pub fn locate(&self) -> JoinHandle<()> {
        let geolocator = self.services.geolocator.clone();
        self.spawn(async move { TaskOutcome::Located(geolocator.current_position().await) })
    }

    pub fn search_nearby(&self, generation: u64, center: Coordinate) -> JoinHandle<()> {
        let search = self.search.clone();
        self.spawn(async move {
            let result = search
                .search(center)
                .await
                .map(|places| LocatedSearch { center, places });
            TaskOutcome::Search { generation, result }
        })
    }

    pub fn search_address(&self, generation: u64, query: String) -> JoinHandle<()> {
        let search = self.search.clone();
        self.spawn(async move {
            let result = search.search_address(&query).await;
            TaskOutcome::Search { generation, result }
        })
    }

    pub fn route(
        &self,
        generation: u64,
        origin: Option<Coordinate>,
        destination: MarkerId,
        place: Place,
    ) -> JoinHandle<()> {
        let planner = self.planner.clone();
        self.spawn(async move {
            let result = planner.plan(origin, &place).await;
            TaskOutcome::Route {
                generation,
                destination,
                result,
            }
        })
    }

    pub fn lookup_disease(&self, query: String) -> JoinHandle<()> {
        let disease = self.services.disease.clone();
        self.spawn(async move { TaskOutcome::Disease(disease.lookup(&query).await) })
    }

    pub fn predict(&self, description: String) -> JoinHandle<()> {
        let prediction = self.services.prediction.clone();
        self.spawn(async move { TaskOutcome::Prediction(prediction.predict(&description).await) })
    }

    pub fn send_chat(&self, message: String) -> JoinHandle<()> {
        let chat = self.services.chat.clone();
        self.spawn(async move { TaskOutcome::Chat(chat.send(&message).await) })
    }
}

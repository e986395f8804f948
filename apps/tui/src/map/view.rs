use crate::domain::{Coordinate, Place, PlaceCategory, RouteSummary};
use std::collections::{HashMap, HashSet};

/// Identity of a place marker. A place returned by both category searches
/// gets one marker per category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerId {
    pub category: PlaceCategory,
    pub place_id: String,
}

impl MarkerId {
    pub fn for_place(place: &Place) -> Self {
        Self {
            category: place.category,
            place_id: place.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    CurrentLocation,
    Place(PlaceCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub title: String,
}

/// A displayed place together with the marker that represents it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacePin {
    pub id: MarkerId,
    pub place: Place,
    pub marker: Marker,
}

impl PlacePin {
    fn new(place: Place) -> Self {
        let marker = Marker {
            kind: MarkerKind::Place(place.category),
            position: place.location,
            title: place.name.clone(),
        };
        Self {
            id: MarkerId::for_place(&place),
            place,
            marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoWindow {
    pub anchor: MarkerId,
    pub title: String,
    pub lines: Vec<String>,
    pub book_action: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    pub destination: MarkerId,
    pub summary: RouteSummary,
}

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    pub removed: usize,
    pub added: usize,
    pub kept: usize,
}

/// Map state: one viewport, one current-location marker, the place pins of
/// the latest search batch, at most one info window and at most one route.
#[derive(Debug, Clone)]
pub struct MapView {
    center: Coordinate,
    radius_m: u32,
    current_location: Option<Marker>,
    pins: Vec<PlacePin>,
    info_window: Option<InfoWindow>,
    route: Option<RouteOverlay>,
}

impl MapView {
    pub const fn new(center: Coordinate, radius_m: u32) -> Self {
        Self {
            center,
            radius_m,
            current_location: None,
            pins: Vec::new(),
            info_window: None,
            route: None,
        }
    }

    pub const fn center(&self) -> Coordinate {
        self.center
    }

    pub const fn radius_m(&self) -> u32 {
        self.radius_m
    }

    pub const fn current_location(&self) -> Option<&Marker> {
        self.current_location.as_ref()
    }

    pub fn pins(&self) -> &[PlacePin] {
        &self.pins
    }

    pub const fn info_window(&self) -> Option<&InfoWindow> {
        self.info_window.as_ref()
    }

    pub const fn route(&self) -> Option<&RouteOverlay> {
        self.route.as_ref()
    }

    pub fn recenter(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Replaces the current-location marker and centers the map on it.
    pub fn set_current_location(&mut self, position: Coordinate) {
        self.current_location = Some(Marker {
            kind: MarkerKind::CurrentLocation,
            position,
            title: "You are here".to_string(),
        });
        self.center = position;
    }

    /// Makes `places` the displayed set. Markers that appear in both the old
    /// and the new batch are kept, the rest of the old batch is detached.
    pub fn reconcile(&mut self, places: Vec<Place>) -> MarkerDiff {
        let desired: HashSet<MarkerId> = places.iter().map(MarkerId::for_place).collect();

        let mut previous: HashMap<MarkerId, PlacePin> = HashMap::new();
        let mut removed = 0;
        for pin in self.pins.drain(..) {
            if desired.contains(&pin.id) {
                previous.insert(pin.id.clone(), pin);
            } else {
                removed += 1;
            }
        }

        let mut diff = MarkerDiff {
            removed,
            ..MarkerDiff::default()
        };

        for place in places {
            let id = MarkerId::for_place(&place);
            match previous.remove(&id) {
                Some(mut pin) => {
                    pin.marker.position = place.location;
                    pin.marker.title.clone_from(&place.name);
                    pin.place = place;
                    self.pins.push(pin);
                    diff.kept += 1;
                }
                None => {
                    self.pins.push(PlacePin::new(place));
                    diff.added += 1;
                }
            }
        }

        if let Some(window) = &self.info_window {
            if !desired.contains(&window.anchor) {
                self.info_window = None;
            }
        }
        if let Some(route) = &self.route {
            if !desired.contains(&route.destination) {
                self.route = None;
            }
        }

        tracing::debug!(
            removed = diff.removed,
            added = diff.added,
            kept = diff.kept,
            "place markers reconciled"
        );
        diff
    }

    pub fn pin(&self, id: &MarkerId) -> Option<&PlacePin> {
        self.pins.iter().find(|pin| &pin.id == id)
    }

    /// Opens the info window for a displayed place, replacing any open one.
    pub fn open_info_window(&mut self, id: &MarkerId, route: Option<&RouteSummary>) -> bool {
        let Some(pin) = self.pin(id) else {
            return false;
        };
        let window = info_window_for(pin, route);
        self.info_window = Some(window);
        true
    }

    pub fn close_info_window(&mut self) {
        self.info_window = None;
    }

    /// Draws `summary` as the route overlay. Any previous overlay is dropped.
    pub fn show_route(&mut self, destination: MarkerId, summary: RouteSummary) {
        self.route = Some(RouteOverlay {
            destination,
            summary,
        });
    }

    pub fn clear_route(&mut self) {
        self.route = None;
    }

    pub const fn overlay_count(&self) -> usize {
        if self.route.is_some() {
            1
        } else {
            0
        }
    }
}

fn info_window_for(pin: &PlacePin, route: Option<&RouteSummary>) -> InfoWindow {
    let place = &pin.place;
    let mut lines = vec![
        place.vicinity.clone(),
        format!(
            "Rating: {}",
            place
                .rating
                .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}"))
        ),
        format!("Type: {}", place.category.label()),
    ];
    if let Some(route) = route {
        lines.push(format!("Distance: {}", route.distance_text));
        lines.push(format!("Duration: {}", route.duration_text));
    }

    InfoWindow {
        anchor: pin.id.clone(),
        title: place.name.clone(),
        lines,
        book_action: place.category.offers_booking(),
    }
}

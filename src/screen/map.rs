use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use crate::{
    api::{TransitApi, TripQuery},
    models::TripResult,
    screen::{ScreenState, StateCell, lock},
    shared::geo::Coordinate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEndpoint {
    Origin,
    Destination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapPoints {
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
}

/// Trip planning between two points picked on the map.
pub struct MapScreen<A> {
    api: Arc<A>,
    max_trips: u8,
    points: Mutex<MapPoints>,
    selected: Mutex<Option<usize>>,
    state: StateCell<Vec<TripResult>>,
}

impl<A: TransitApi> MapScreen<A> {
    pub fn new(api: Arc<A>, max_trips: u8) -> Self {
        Self {
            api,
            max_trips,
            points: Mutex::new(MapPoints::default()),
            selected: Mutex::new(None),
            state: StateCell::default(),
        }
    }

    /// A tap fills the origin, then the destination; a third tap starts over.
    pub fn place(&self, point: Coordinate) -> MapPoints {
        let mut points = lock(&self.points);
        match (points.origin, points.destination) {
            (None, _) => points.origin = Some(point),
            (Some(_), None) => points.destination = Some(point),
            (Some(_), Some(_)) => {
                *points = MapPoints {
                    origin: Some(point),
                    destination: None,
                }
            }
        }
        *points
    }

    pub fn drag(&self, endpoint: MapEndpoint, point: Coordinate) -> MapPoints {
        let mut points = lock(&self.points);
        match endpoint {
            MapEndpoint::Origin => points.origin = Some(point),
            MapEndpoint::Destination => points.destination = Some(point),
        }
        *points
    }

    pub fn clear(&self) {
        *lock(&self.points) = MapPoints::default();
        *lock(&self.selected) = None;
        self.state.set(ScreenState::Idle);
    }

    pub fn points(&self) -> MapPoints {
        *lock(&self.points)
    }

    /// Searches trips between the placed points, with leg geometry. Does
    /// nothing until both points are placed.
    pub async fn search(&self) {
        let MapPoints {
            origin: Some(origin),
            destination: Some(destination),
        } = self.points()
        else {
            debug!("Map search needs both points");
            return;
        };
        let query = TripQuery::new(origin, destination)
            .with_polylines()
            .with_max_results(self.max_trips);
        self.state
            .load("map trips", self.api.search_trips(&query))
            .await;
        let first = self
            .state
            .current()
            .data()
            .filter(|trips| !trips.is_empty())
            .map(|_| 0);
        *lock(&self.selected) = first;
    }

    /// Highlights one result. Returns `false` for an index outside the list.
    pub fn select(&self, index: usize) -> bool {
        let in_range = self
            .state
            .current()
            .data()
            .is_some_and(|trips| index < trips.len());
        if in_range {
            *lock(&self.selected) = Some(index);
        }
        in_range
    }

    pub fn selected(&self) -> Option<usize> {
        *lock(&self.selected)
    }

    pub fn state(&self) -> watch::Ref<'_, ScreenState<Vec<TripResult>>> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<TripResult>>> {
        self.state.subscribe()
    }
}

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{OnceCell, watch};

use crate::{
    api::{Error, TransitApi, TripQuery, resolve_station},
    config::CommuteConfig,
    models::{LeaveBy, StopLocation, TripResult},
    screen::{ScreenState, StateCell},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrip {
    pub trip: TripResult,
    pub leave_by: LeaveBy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommuteRoute {
    pub origin: StopLocation,
    pub destination: StopLocation,
}

/// Leave-by planner for the configured origin/destination pair.
pub struct TripsScreen<A> {
    api: Arc<A>,
    commute: CommuteConfig,
    max_trips: u8,
    route: OnceCell<CommuteRoute>,
    state: StateCell<Vec<PlannedTrip>>,
}

impl<A: TransitApi> TripsScreen<A> {
    pub fn new(api: Arc<A>, commute: CommuteConfig, max_trips: u8) -> Self {
        Self {
            api,
            commute,
            max_trips,
            route: OnceCell::new(),
            state: StateCell::default(),
        }
    }

    /// Searches the next trips. Station names are resolved on the first
    /// successful call only.
    pub async fn refresh(&self) {
        self.state.load("commute trips", self.plan()).await;
    }

    async fn plan(&self) -> Result<Vec<PlannedTrip>, Error> {
        let route = self
            .route
            .get_or_try_init(|| self.resolve_route())
            .await?;
        let query = TripQuery::between_stations(&route.origin.id, &route.destination.id)
            .with_max_results(self.max_trips);
        let trips = self.api.search_trips(&query).await?;
        Ok(trips
            .into_iter()
            .map(|trip| PlannedTrip {
                leave_by: trip.leave_by(&self.commute),
                trip,
            })
            .collect())
    }

    async fn resolve_route(&self) -> Result<CommuteRoute, Error> {
        let origin = resolve_station(self.api.as_ref(), &self.commute.origin_names).await?;
        let destination =
            resolve_station(self.api.as_ref(), &self.commute.destination_names).await?;
        Ok(CommuteRoute {
            origin,
            destination,
        })
    }

    pub fn route(&self) -> Option<&CommuteRoute> {
        self.route.get()
    }

    pub fn commute(&self) -> &CommuteConfig {
        &self.commute
    }

    pub fn state(&self) -> watch::Ref<'_, ScreenState<Vec<PlannedTrip>>> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState<Vec<PlannedTrip>>> {
        self.state.subscribe()
    }
}

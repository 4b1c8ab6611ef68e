use std::future::Future;

mod client;
mod error;
mod query;
pub use client::*;
pub use error::*;
pub use query::*;

use tracing::debug;

use crate::{
    models::{Departure, StopLocation, TripResult},
    shared::best_match,
};

/// Access to the upstream journey planner. Every list-or-object quirk of the
/// wire format is already normalized away in the returned values.
pub trait TransitApi: Send + Sync {
    fn search_locations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<StopLocation>, Error>> + Send;

    fn search_trips(
        &self,
        query: &TripQuery,
    ) -> impl Future<Output = Result<Vec<TripResult>, Error>> + Send;

    fn departure_board(
        &self,
        station_id: &str,
    ) -> impl Future<Output = Result<Vec<Departure>, Error>> + Send;
}

/// Resolves the first candidate name that yields any station, picking the
/// closest-named result.
pub async fn resolve_station<A>(api: &A, names: &[String]) -> Result<StopLocation, Error>
where
    A: TransitApi,
{
    for name in names {
        let stops = api.search_locations(name).await?;
        if let Some(stop) = best_match(name, &stops) {
            debug!("Resolved {name:?} to {} ({})", stop.name, stop.id);
            return Ok(stop.clone());
        }
        debug!("No station matches {name:?}");
    }
    Err(Error::NotFound(names.join(" / ")))
}

use std::sync::Arc;

use crate::{
    dto::{PlannedTripDto, StateDto},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Refreshes the commute planner, like a pull-to-refresh.
pub async fn trips(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    state.trips.refresh().await;
    let result = StateDto::from(&*state.trips.state(), |trips| {
        trips.iter().map(PlannedTripDto::from).collect::<Vec<_>>()
    });
    Ok(Json(result).into_response())
}

use std::{collections::HashMap, sync::Arc};

use crate::{
    dto::{BoardDto, DepartureDto, StateDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

/// Opens the board for `station` and keeps it polled. Asking again for the
/// same station returns the latest polled state without a new request,
/// unless that state is a failure.
pub async fn departures(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(station) = params.get("station").map(|s| s.trim()) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if station.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    {
        let mut board = state.board.lock().await;
        let failed = state.departures.state().error().is_some();
        let is_open = board.as_ref().is_some_and(|(name, _)| name == station);
        if !is_open || failed {
            info!("Opening departure board for {station:?}");
            // Stop the old poll before the new station replaces its board.
            board.take();
            state.departures.open(station).await;
            let poll = state.departures.start_polling();
            *board = Some((station.to_string(), poll));
        }
    }

    let name = state.departures.station().await.map(|stop| stop.name);
    let result = StateDto::from(&*state.departures.state(), |departures| BoardDto {
        station: name,
        departures: departures.iter().map(DepartureDto::from).collect(),
    });
    Ok(Json(result).into_response())
}

use std::{collections::HashMap, sync::Arc};

use crate::{
    dto::{MapDto, RouteDto, StateDto, TripDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pendler::prelude::*;
use tracing::error;

/// Trip search between two map points given as `lat,lon`.
pub async fn route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let from = coordinate_param(&params, "from")?;
    let to = coordinate_param(&params, "to")?;

    let screen = MapScreen::new(state.api.clone(), state.config.api.max_trips);
    screen.place(from);
    screen.place(to);
    screen.search().await;

    let selected = screen.selected();
    let result = StateDto::from(&*screen.state(), |trips| RouteDto {
        selected,
        trips: trips.iter().map(TripDto::from).collect(),
    });
    Ok(Json(result).into_response())
}

pub async fn map(State(state): State<Arc<AppState>>) -> Json<MapDto> {
    Json(MapDto::from(&state.config.map))
}

fn coordinate_param(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Coordinate, StatusCode> {
    let value = params.get(key).ok_or(StatusCode::BAD_REQUEST)?;
    value.parse().map_err(|err| {
        error!("Invalid {key} coordinate: {err}");
        StatusCode::BAD_REQUEST
    })
}

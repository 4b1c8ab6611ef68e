use std::{collections::HashMap, sync::Arc};

use crate::{
    dto::{StateDto, StopDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    if let Some(query) = params.get("q") {
        state.search.search(query).await;
        let result = StateDto::from(&*state.search.state(), |stops| {
            stops.iter().map(StopDto::from).collect::<Vec<_>>()
        });
        Ok(Json(result).into_response())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

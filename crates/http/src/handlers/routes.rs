use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use flightboard_core::RouteRecord;

use crate::api_error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddRouteRequest {
    pub flight_id: String,
    pub origin: String,
    pub destination: String,
}

/// Full store snapshot, including source and freshness per entry.
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteRecord>> {
    Json(state.manual.list_all())
}

/// Inserts or replaces a manual route record.
pub async fn add_route(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddRouteRequest>,
) -> Result<Json<RouteRecord>, ApiError> {
    let record = state.manual.add_or_replace(&req.flight_id, &req.origin, &req.destination)?;
    Ok(Json(record))
}

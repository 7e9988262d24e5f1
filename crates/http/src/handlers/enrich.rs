use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use flightboard_core::{EnrichedPosition, PositionRecord};

use crate::AppState;

/// Enriches a feed batch. Infallible by design: records the resolver
/// cannot place come back with origin/destination unset.
pub async fn enrich_batch(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<PositionRecord>>,
) -> Json<Vec<EnrichedPosition>> {
    Json(state.enrichment.enrich_batch(batch).await)
}

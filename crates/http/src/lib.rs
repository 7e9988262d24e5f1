//! HTTP API server for flightboard.

pub mod api_error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use flightboard_service::{EnrichmentService, ManualRouteService};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers; the
/// services own the lock-guarded store between them.
pub struct AppState {
    /// Feed enrichment (orchestrated lookups).
    pub enrichment: EnrichmentService,
    /// Operator route overrides and listing.
    pub manual: ManualRouteService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/routes", get(handlers::routes::list_routes).post(handlers::routes::add_route))
        .route("/api/enrich", post(handlers::enrich::enrich_batch))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod tests;

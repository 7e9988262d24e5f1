//! Core domain types for flightboard.

pub mod config;
pub mod env_config;
pub mod position;
pub mod route;

pub use config::EnrichmentConfig;
pub use env_config::env_parse_with_default;
pub use position::{EnrichedPosition, PositionRecord};
pub use route::{normalize_flight_id, RouteRecord, RouteSource};

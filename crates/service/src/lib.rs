//! Business logic layer: lookup orchestration, feed enrichment, and
//! manual route overrides.

pub mod enrich;
pub mod error;
pub mod manual;
pub mod resolver;

pub use enrich::EnrichmentService;
pub use error::ServiceError;
pub use manual::ManualRouteService;
pub use resolver::RouteResolver;

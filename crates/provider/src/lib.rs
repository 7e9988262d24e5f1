//! Historical flight-data providers.
//!
//! The orchestrator talks to a single [`RouteProvider`] capability so a
//! different historical backend can be substituted without touching the
//! lookup logic. One provider is active at a time, selected by
//! configuration.

pub mod error;
pub mod opensky;

use async_trait::async_trait;

pub use error::ProviderError;
pub use opensky::OpenSkyProvider;

/// A route discovered from historical flight data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLookup {
    pub origin: String,
    pub destination: String,
}

/// Capability interface over a secondary historical-data service.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolves a flight identifier (via its transponder id) to a route
    /// within the provider's trailing search window.
    ///
    /// `Ok(None)` means the service has no usable historical flights for
    /// the identifier — an expected, common outcome (general aviation,
    /// military, new aircraft), not an error.
    async fn resolve(
        &self,
        flight_id: &str,
        hardware_id: &str,
    ) -> Result<Option<RouteLookup>, ProviderError>;
}

/// Stand-in wired when automatic discovery is disabled by configuration.
///
/// Always reports [`ProviderError::Unavailable`], keeping a single code
/// path through the orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl RouteProvider for DisabledProvider {
    async fn resolve(
        &self,
        _flight_id: &str,
        _hardware_id: &str,
    ) -> Result<Option<RouteLookup>, ProviderError> {
        Err(ProviderError::Unavailable("automatic route discovery is disabled".to_string()))
    }
}

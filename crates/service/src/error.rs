//! Typed error enum for the service layer.
//!
//! Unifies store and provider failures into a single error type so
//! callers can match on specific failure modes instead of downcasting
//! opaque boxes. Provider failures never actually cross the enrichment
//! boundary; they are absorbed in the resolver.

use flightboard_provider::ProviderError;
use flightboard_store::StoreError;
use thiserror::Error;

/// Service-layer error unifying store and provider failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Route file could not be persisted.
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// Historical-data lookup failed.
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    /// Caller provided invalid input (empty identifier or airport).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is a caller-side validation failure.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

//! Typed error enum for the provider crate.

use thiserror::Error;

/// Errors from historical-data lookups.
///
/// Both variants are soft failures at the orchestrator: the caller
/// degrades to a stale or absent route, never propagates them upward.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The daily call budget would be exceeded; no request was made.
    #[error("daily call budget of {limit} exhausted")]
    QuotaExceeded { limit: u32 },

    /// Network failure, timeout, non-success status, or malformed response.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Whether this failure is the quota ceiling, as opposed to transport.
    #[must_use]
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

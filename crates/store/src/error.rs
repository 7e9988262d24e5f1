//! Typed error enum for the store layer.

use thiserror::Error;

/// Store-layer failure while persisting the route file.
///
/// A corrupt file at load time is not an error: loading fails soft and
/// starts from an empty mapping so the service can always come up.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure while writing the route file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Route map could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

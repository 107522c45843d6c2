use crate::generator::GenerateError;
use crate::store::StoreError;
use crate::types::LookupKey;

/// Failure outcomes of a resolution
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Query is empty")]
    InvalidQuery,

    #[error("No dictionary entry for '{query}'")]
    NotFound { query: String },

    #[error("Lookup failed: {0}")]
    LookupFailed(#[from] GenerateError),

    #[error("Lookup cancelled")]
    Cancelled,
}

impl LookupError {
    /// Whether re-issuing the same request could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::LookupFailed(_))
    }
}

/// A resolved entry could not be written back to the store.
/// The entry is still handed to the caller.
#[derive(Debug, thiserror::Error)]
#[error("Failed to save '{key}': {source}")]
pub struct PersistenceFailed {
    pub key: LookupKey,
    #[source]
    pub source: StoreError,
}

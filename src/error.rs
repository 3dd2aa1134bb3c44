//! Error taxonomy for the sync service.

use thiserror::Error;

/// Errors produced by the sync pipeline.
///
/// `Configuration` is fatal at startup. `Fetch` and `Ingestion` are caught at
/// the processing boundary and converted into error-status results; they never
/// reach the webhook HTTP layer, whose response has already been sent by the
/// time background work runs.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Invalid service or chunking configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// BookStack could not deliver page content.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The ingestion sink could not accept chunks.
    #[error("ingestion error: {0}")]
    Ingestion(String),
}

impl SyncError {
    /// Wrap a reqwest error as a fetch failure.
    pub fn fetch(err: impl std::fmt::Display) -> Self {
        SyncError::Fetch(err.to_string())
    }

    /// Wrap a reqwest error as an ingestion failure.
    pub fn ingestion(err: impl std::fmt::Display) -> Self {
        SyncError::Ingestion(err.to_string())
    }
}

//! Catalog error types.

use crate::bustime::FetchError;

/// Errors turning raw bytes into a validated catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Payload is not the expected JSON shape
    #[error("malformed route catalog: {0}")]
    Malformed(String),

    /// Payload decoded but reports a non-200 status
    #[error("upstream reported status {0}")]
    UpstreamStatus(i64),

    /// A route identifier lacks the agency prefix
    #[error("route id {0:?} is missing the agency prefix")]
    MissingPrefix(String),
}

/// Errors from searching a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No catalog has been built yet
    #[error("route catalog is not ready")]
    NotReady,
}

/// Errors from loading a catalog into the store.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

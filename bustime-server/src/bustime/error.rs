//! Bus Time fetch error types.

use std::path::PathBuf;

/// Errors that can occur when fetching the raw route catalog.
///
/// A non-2xx transport status is deliberately absent: the Bus Time API
/// embeds its own status code in the payload, which is validated when the
/// catalog is built.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The endpoint is not an absolute http(s) URL
    #[error("invalid endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Network failure or timeout
    #[error("upstream unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// A fixture file could not be read
    #[error("failed to read fixture {path:?}: {message}")]
    Fixture { path: PathBuf, message: String },
}

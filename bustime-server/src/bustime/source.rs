//! Where raw catalog bytes come from.
//!
//! `Fixture` serves a saved `routes-for-agency` response from disk as if it
//! were a live API response, for development without an API key.

use std::path::{Path, PathBuf};

use super::client::BusTimeClient;
use super::error::FetchError;

/// Source of raw route catalog bytes.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Live Bus Time API.
    Live(BusTimeClient),
    /// JSON file on disk.
    Fixture(PathBuf),
}

impl CatalogSource {
    /// Create a source that reads the given fixture file.
    pub fn fixture(path: impl Into<PathBuf>) -> Self {
        Self::Fixture(path.into())
    }

    /// Fetch the raw catalog bytes.
    pub async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Live(client) => client.fetch_routes().await,
            Self::Fixture(path) => read_fixture(path).await,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Live(client) => format!("Bus Time API at {}", client.endpoint()),
            Self::Fixture(path) => format!("fixture {}", path.display()),
        }
    }
}

async fn read_fixture(path: &Path) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path).await.map_err(|e| FetchError::Fixture {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

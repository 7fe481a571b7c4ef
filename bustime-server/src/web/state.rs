//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::SearchCache;
use crate::catalog::CatalogStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route catalog snapshot
    pub catalog: Arc<CatalogStore>,

    /// Memoised search results
    pub search_cache: Arc<SearchCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CatalogStore, search_cache: SearchCache) -> Self {
        Self {
            catalog: Arc::new(catalog),
            search_cache: Arc::new(search_cache),
        }
    }
}

//! Caching layer for search results.
//!
//! Search-as-you-type sends a request per keystroke, mostly repeating the
//! same few prefixes. Results are cached by (snapshot generation, folded
//! query); publishing a new catalog bumps the generation, so entries from
//! an older catalog are never returned.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::catalog::{CatalogSnapshot, SearchError, SearchQuery, search};

/// Cache key: (snapshot generation, case-folded query).
type ResultKey = (u64, String);

/// Cached search result.
type ResultEntry = Arc<Vec<String>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Search results cache.
pub struct SearchCache {
    results: MokaCache<ResultKey, ResultEntry>,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    /// Search `snapshot`, using a cached result if available.
    ///
    /// Same contract as [`search`]: an empty query is answered without a
    /// snapshot, otherwise a missing snapshot is `NotReady`.
    pub async fn search(
        &self,
        snapshot: Option<&CatalogSnapshot>,
        query: &SearchQuery,
    ) -> Result<ResultEntry, SearchError> {
        if query.is_empty() {
            return Ok(Arc::new(Vec::new()));
        }

        let snapshot = snapshot.ok_or(SearchError::NotReady)?;
        let key = (snapshot.generation, query.folded().to_string());

        // Try cache first
        if let Some(cached) = self.results.get(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(search(Some(snapshot.catalog.as_ref()), query)?);
        self.results.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Number of cached result lists, after flushing pending inserts.
    pub async fn entry_count(&self) -> u64 {
        self.results.run_pending_tasks().await;
        self.results.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}

//! Process-wide catalog snapshot with an explicit load lifecycle.
//!
//! Readers clone an `Arc` to the current snapshot and never block on a
//! fetch. A refresh builds a complete new catalog before swapping it in,
//! so a failed or abandoned refresh publishes nothing.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::bustime::CatalogSource;

use super::decode::build_catalog;
use super::error::CatalogError;
use super::snapshot::RouteCatalog;

/// Load lifecycle of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Uninitialized,
    Fetching,
    Ready,
    Failed,
}

/// A published catalog together with its generation number.
///
/// Generations start at 1 and increase on every successful swap.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub catalog: Arc<RouteCatalog>,
}

/// Point-in-time report of the store, for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub status: CatalogStatus,
    pub generation: u64,
    pub routes: Option<usize>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Result of [`CatalogStore::ensure_loaded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A catalog was already published; nothing was fetched.
    AlreadyLoaded(usize),
    /// A catalog was fetched and published.
    Loaded(usize),
}

#[derive(Debug)]
struct StoreState {
    status: CatalogStatus,
    snapshot: Option<CatalogSnapshot>,
    generation: u64,
    last_error: Option<String>,
}

/// Shared route catalog.
///
/// The state lock is never held across an await; the refresh mutex
/// serialises writers.
#[derive(Debug)]
pub struct CatalogStore {
    source: CatalogSource,
    state: RwLock<StoreState>,
    writer: Mutex<()>,
}

impl CatalogStore {
    /// Create an uninitialised store.
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            state: RwLock::new(StoreState {
                status: CatalogStatus::Uninitialized,
                snapshot: None,
                generation: 0,
                last_error: None,
            }),
            writer: Mutex::new(()),
        }
    }

    /// The current snapshot, if any catalog has been published.
    ///
    /// Remains available while a refresh is in flight and after a failed
    /// refresh.
    pub fn snapshot(&self) -> Option<CatalogSnapshot> {
        self.read().snapshot.clone()
    }

    pub fn status(&self) -> StoreStatus {
        let state = self.read();
        StoreStatus {
            status: state.status,
            generation: state.generation,
            routes: state.snapshot.as_ref().map(|s| s.catalog.len()),
            fetched_at: state.snapshot.as_ref().map(|s| s.catalog.built_at()),
            last_error: state.last_error.clone(),
        }
    }

    /// Fetch and publish a fresh catalog, replacing any existing one.
    ///
    /// Returns the number of routes published.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let _writer = self.writer.lock().await;
        self.load().await
    }

    /// Fetch and publish a catalog only if none has been published yet.
    pub async fn ensure_loaded(&self) -> Result<LoadOutcome, CatalogError> {
        if let Some(snapshot) = self.snapshot() {
            return Ok(LoadOutcome::AlreadyLoaded(snapshot.catalog.len()));
        }

        let _writer = self.writer.lock().await;

        // Another caller may have loaded while we waited.
        if let Some(snapshot) = self.snapshot() {
            return Ok(LoadOutcome::AlreadyLoaded(snapshot.catalog.len()));
        }

        self.load().await.map(LoadOutcome::Loaded)
    }

    /// Must be called with the writer lock held.
    async fn load(&self) -> Result<usize, CatalogError> {
        let mut fetching = FetchingGuard::enter(self);

        let result = self.fetch_and_build().await;
        fetching.disarm();
        self.publish(result)
    }

    fn publish(&self, result: Result<RouteCatalog, CatalogError>) -> Result<usize, CatalogError> {
        let mut state = self.write();

        match result {
            Ok(catalog) => {
                let count = catalog.len();
                state.generation += 1;
                state.snapshot = Some(CatalogSnapshot {
                    generation: state.generation,
                    catalog: Arc::new(catalog),
                });
                state.status = CatalogStatus::Ready;
                state.last_error = None;
                info!(
                    routes = count,
                    generation = state.generation,
                    "published route catalog"
                );
                Ok(count)
            }
            Err(e) => {
                state.status = CatalogStatus::Failed;
                state.last_error = Some(e.to_string());
                warn!(error = %e, source = %self.source.describe(), "route catalog load failed");
                Err(e)
            }
        }
    }

    async fn fetch_and_build(&self) -> Result<RouteCatalog, CatalogError> {
        let raw = self.source.fetch().await?;
        Ok(build_catalog(&raw)?)
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the store as `Fetching` and restores the previous status if the
/// load future is dropped before completing.
struct FetchingGuard<'a> {
    store: &'a CatalogStore,
    previous: Option<CatalogStatus>,
}

impl<'a> FetchingGuard<'a> {
    fn enter(store: &'a CatalogStore) -> Self {
        let mut state = store.write();
        let previous = state.status;
        state.status = CatalogStatus::Fetching;
        Self {
            store,
            previous: Some(previous),
        }
    }

    fn disarm(&mut self) {
        self.previous = None;
    }
}

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.store.write().status = previous;
        }
    }
}

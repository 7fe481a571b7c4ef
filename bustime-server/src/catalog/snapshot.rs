//! Validated route catalog.

use chrono::{DateTime, Utc};

use super::route::RouteRecord;

/// A fully decoded and status-validated route catalog.
///
/// Only [`build_catalog`](super::build_catalog) creates one, and it is
/// never mutated afterwards. Refreshing builds a new catalog.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<RouteRecord>,
    built_at: DateTime<Utc>,
    upstream_version: i64,
    upstream_text: String,
}

impl RouteCatalog {
    pub(super) fn new(
        routes: Vec<RouteRecord>,
        upstream_version: i64,
        upstream_text: String,
    ) -> Self {
        Self {
            routes,
            built_at: Utc::now(),
            upstream_version,
            upstream_text,
        }
    }

    /// Routes in upstream order.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Look up a route by its stripped id (exact match).
    pub fn get(&self, id: &str) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// When this catalog was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// The `version` field of the upstream envelope.
    pub fn upstream_version(&self) -> i64 {
        self.upstream_version
    }

    /// The `text` field of the upstream envelope (usually "OK").
    pub fn upstream_text(&self) -> &str {
        &self.upstream_text
    }
}

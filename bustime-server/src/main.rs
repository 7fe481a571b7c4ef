use std::net::SocketAddr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bustime_server::cache::{CacheConfig, SearchCache};
use bustime_server::catalog::CatalogStore;
use bustime_server::config::Config;
use bustime_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let source = match config.catalog_source() {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to create route catalog source: {e}");
            std::process::exit(1);
        }
    };
    info!("Route catalog source: {}", source.describe());

    // Load the catalog up front; if this fails, GET /routes retries.
    let catalog = CatalogStore::new(source);
    match catalog.refresh().await {
        Ok(count) => info!("Loaded {count} routes"),
        Err(e) => warn!("Initial route catalog load failed: {e}"),
    }

    let search_cache = SearchCache::new(&CacheConfig::default());
    let state = AppState::new(catalog, search_cache);

    let app = create_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Route search listening on http://{addr}");
    info!("  GET  /app/             - Search page");
    info!("  POST /search           - Search routes (form field: search)");
    info!("  GET  /routes           - Load route catalog if needed");
    info!("  GET  /routes/:id       - Route details");
    info!("  GET  /catalog/status   - Catalog status");
    info!("  POST /catalog/refresh  - Re-fetch route catalog");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use crate::catalog::{CatalogError, LoadOutcome, SearchError, SearchQuery};

use super::dto::*;
use super::state::AppState;
use super::templates::SearchResultsTemplate;

/// Create the application router.
///
/// `static_dir` is served under `/app`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/app/") }))
        .route("/health", get(health))
        .route("/search", post(search_routes))
        .route("/routes", get(load_routes))
        .route("/routes/:id", get(route_detail))
        .route("/catalog/status", get(catalog_status))
        .route("/catalog/refresh", post(refresh_catalog))
        .nest_service("/app", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search route ids, rendering matches as table rows.
async fn search_routes(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let query = SearchQuery::new(form.search);

    if query.is_empty() {
        return Ok(StatusCode::OK.into_response());
    }

    let snapshot = state.catalog.snapshot();
    let routes = state
        .search_cache
        .search(snapshot.as_ref(), &query)
        .await?;

    debug!(query = query.as_str(), matches = routes.len(), "route search");

    let html = SearchResultsTemplate { routes: &routes }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

    Ok(Html(html).into_response())
}

/// Load the route catalog unless it is already loaded.
async fn load_routes(State(state): State<AppState>) -> Result<String, AppError> {
    match state.catalog.ensure_loaded().await? {
        LoadOutcome::AlreadyLoaded(_) => Ok("Route catalog is already loaded".to_string()),
        LoadOutcome::Loaded(count) => Ok(format!("Loaded {count} routes")),
    }
}

/// Re-fetch the route catalog and swap it in.
async fn refresh_catalog(State(state): State<AppState>) -> Result<String, AppError> {
    let count = state.catalog.refresh().await?;
    state.search_cache.invalidate_all();
    info!(routes = count, "route catalog refreshed on request");
    Ok(format!("Loaded {count} routes"))
}

/// Catalog lifecycle report.
async fn catalog_status(State(state): State<AppState>) -> Json<CatalogStatusResponse> {
    Json(CatalogStatusResponse {
        store: state.catalog.status(),
        cached_searches: state.search_cache.entry_count().await,
    })
}

/// Details of one route by stripped id.
async fn route_detail(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<RouteResult>, AppError> {
    let snapshot = state.catalog.snapshot().ok_or(SearchError::NotReady)?;

    snapshot
        .catalog
        .get(&id)
        .map(|record| Json(RouteResult::from_record(record)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Route {id} not found"),
        })
}

/// Application error type.
///
/// `message` is logged; only [`AppError::public_message`] reaches the client.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Unavailable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::NotFound { message } => message.clone(),
            AppError::Unavailable { .. } => "Route catalog is not loaded yet".to_string(),
            AppError::BadGateway { .. } | AppError::Internal { .. } => {
                "Oops, something went wrong".to_string()
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::NotFound { message }
            | AppError::Unavailable { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::NotReady => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), "{}", self.message());

        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

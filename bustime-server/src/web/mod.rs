//! Web layer for the route search server.
//!
//! Serves the search page, the HTML search fragment and catalog
//! management endpoints.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;

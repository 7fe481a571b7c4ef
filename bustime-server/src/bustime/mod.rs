//! MTA Bus Time route catalog fetcher.
//!
//! Bus Time wraps every response in an envelope with its own `code`
//! field, served inside a 200 transport response. This module only
//! retrieves bytes; the envelope is validated by [`crate::catalog`].

mod client;
mod error;
mod source;
mod types;

pub use client::{
    BusTimeClient, BusTimeConfig, DEFAULT_ROUTES_URL, DEFAULT_TIMEOUT_SECS, fetch,
};
pub use error::FetchError;
pub use source::CatalogSource;
pub use types::{RouteDto, RoutesData, RoutesForAgencyResponse, StatusEnvelope};

//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::{RouteRecord, StoreStatus};

/// Form posted by the search box.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    /// Route id fragment; absent and empty both mean "no search"
    #[serde(default)]
    pub search: String,
}

/// A single route, as returned by `GET /routes/{id}`.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub description: String,
    pub select_bus_service: bool,
    pub color: String,
    pub text_color: String,
}

impl RouteResult {
    /// Create from a catalog record.
    pub fn from_record(record: &RouteRecord) -> Self {
        Self {
            id: record.id.clone(),
            short_name: record.short_name.clone(),
            long_name: record.long_name.clone(),
            description: record.description.clone(),
            select_bus_service: record.select_bus_service,
            color: record.color.clone(),
            text_color: record.text_color.clone(),
        }
    }
}

/// Body of `GET /catalog/status`: the store report plus search cache size.
#[derive(Debug, Serialize)]
pub struct CatalogStatusResponse {
    #[serde(flatten)]
    pub store: StoreStatus,
    pub cached_searches: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_form_defaults_to_empty() {
        let form: SearchForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.search, "");
    }

    #[test]
    fn route_result_serializes_snake_case() {
        let record = RouteRecord {
            id: "Q58-SBS".into(),
            short_name: "Q58-SBS".into(),
            long_name: "Flushing - Ridgewood".into(),
            description: "".into(),
            select_bus_service: true,
            color: "".into(),
            text_color: "".into(),
        };
        let json = serde_json::to_value(RouteResult::from_record(&record)).unwrap();
        assert_eq!(json["id"], "Q58-SBS");
        assert_eq!(json["select_bus_service"], true);
        assert_eq!(json["long_name"], "Flushing - Ridgewood");
    }
}

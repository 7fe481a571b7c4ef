//! Route catalog: validation, normalisation and search.
//!
//! Raw Bus Time bytes become a [`RouteCatalog`] through [`build_catalog`],
//! which checks the embedded status code and strips the agency prefix from
//! every route id. [`search`] then matches stripped ids against a query.
//! [`CatalogStore`] holds the process-wide snapshot.

mod decode;
mod error;
mod route;
mod search;
mod snapshot;
mod store;

pub use decode::{UPSTREAM_OK, build_catalog};
pub use error::{CatalogError, DecodeError, SearchError};
pub use route::{
    AGENCY_PREFIX, RouteRecord, SBS_SUFFIX, is_select_bus_service, strip_agency_prefix,
};
pub use search::{SearchQuery, search};
pub use snapshot::RouteCatalog;
pub use store::{CatalogSnapshot, CatalogStatus, CatalogStore, LoadOutcome, StoreStatus};

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::json;

    /// A `routes-for-agency` body with the given (raw id, short name) pairs.
    pub fn catalog_json(routes: &[(&str, &str)]) -> Vec<u8> {
        let list: Vec<_> = routes
            .iter()
            .map(|(id, short_name)| {
                json!({
                    "agencyId": "MTA NYCT",
                    "id": id,
                    "shortName": short_name,
                    "longName": "",
                    "description": "",
                    "color": "",
                    "textColor": "",
                    "type": 3,
                })
            })
            .collect();

        json!({
            "code": 200,
            "currentTime": 0,
            "data": {"limitExceeded": false, "list": list, "references": {}},
            "text": "OK",
            "version": 2,
        })
        .to_string()
        .into_bytes()
    }

    /// B42 and Q58-SBS.
    pub fn scenario_bytes() -> Vec<u8> {
        catalog_json(&[("MTA NYCT_B42", "B42"), ("MTA NYCT_Q58-SBS", "Q58-SBS")])
    }
}

//! Route records and identifier normalisation.

use serde::Serialize;

/// Agency prefix carried by every NYCT route id, e.g. `MTA NYCT_B42`.
///
/// Single-agency: a second agency means replacing [`strip_agency_prefix`].
pub const AGENCY_PREFIX: &str = "MTA NYCT_";

/// Short-name suffix marking a Select Bus Service variant.
pub const SBS_SUFFIX: &str = "-SBS";

/// Strip the agency prefix from a raw route id.
///
/// Returns `None` if the prefix is absent or nothing follows it.
pub fn strip_agency_prefix(raw_id: &str) -> Option<&str> {
    raw_id
        .strip_prefix(AGENCY_PREFIX)
        .filter(|stripped| !stripped.is_empty())
}

/// Whether a short name denotes a Select Bus Service route.
pub fn is_select_bus_service(short_name: &str) -> bool {
    short_name.ends_with(SBS_SUFFIX)
}

/// A single bus route, as kept in a validated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    /// Identifier with the agency prefix removed (e.g. `B42`)
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub description: String,
    /// Derived from the short name; not present on the wire
    pub select_bus_service: bool,
    pub color: String,
    pub text_color: String,
}

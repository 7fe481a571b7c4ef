//! Building a validated catalog from raw Bus Time bytes.

use tracing::debug;

use crate::bustime::{RouteDto, RoutesForAgencyResponse, StatusEnvelope};

use super::error::DecodeError;
use super::route::{RouteRecord, is_select_bus_service, strip_agency_prefix};
use super::snapshot::RouteCatalog;

/// Status code Bus Time reports for a successful response.
pub const UPSTREAM_OK: i64 = 200;

/// Decode, validate and normalise a raw `routes-for-agency` response.
///
/// Any route without the agency prefix fails the whole catalog.
pub fn build_catalog(raw: &[u8]) -> Result<RouteCatalog, DecodeError> {
    let envelope: StatusEnvelope =
        serde_json::from_slice(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    if envelope.code != UPSTREAM_OK {
        return Err(DecodeError::UpstreamStatus(envelope.code));
    }

    let response: RoutesForAgencyResponse =
        serde_json::from_slice(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let data = response
        .data
        .ok_or_else(|| DecodeError::Malformed("missing data object".to_string()))?;

    let routes = data
        .list
        .into_iter()
        .map(normalise_route)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(routes = routes.len(), "built route catalog");

    Ok(RouteCatalog::new(routes, response.version, response.text))
}

fn normalise_route(dto: RouteDto) -> Result<RouteRecord, DecodeError> {
    let id = strip_agency_prefix(&dto.id)
        .ok_or_else(|| DecodeError::MissingPrefix(dto.id.clone()))?
        .to_string();

    Ok(RouteRecord {
        id,
        select_bus_service: is_select_bus_service(&dto.short_name),
        short_name: dto.short_name,
        long_name: dto.long_name,
        description: dto.description,
        color: dto.color,
        text_color: dto.text_color,
    })
}

//! Wire types for the Bus Time `routes-for-agency` endpoint.
//!
//! Field names follow the upstream JSON (camelCase). Only `code` and the
//! route identifiers are required; everything else defaults when absent
//! or `null`.

use serde::{Deserialize, Deserializer};

/// Just the status code, decoded before the rest of the payload.
///
/// Error payloads from Bus Time frequently carry `data: null` or an
/// unexpected shape, so the code is checked on its own first.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    pub code: i64,
}

/// Full response of `routes-for-agency/{agency}.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesForAgencyResponse {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_time: i64,
    #[serde(default)]
    pub data: Option<RoutesData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
}

/// The `data` object of the response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit_exceeded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<RouteDto>,
    /// Agencies, stops, trips etc. Not consumed.
    #[serde(default)]
    pub references: serde_json::Value,
}

/// One entry of `data.list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agency_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_color: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub route_type: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Read `null` as the type's default, like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

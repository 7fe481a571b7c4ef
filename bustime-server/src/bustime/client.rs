//! MTA Bus Time HTTP client.

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use super::error::FetchError;

/// Default endpoint: every route of the MTA New York City Transit agency.
pub const DEFAULT_ROUTES_URL: &str =
    "https://bustime.mta.info/api/where/routes-for-agency/MTA%20NYCT.json";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "key";

/// Configuration for the Bus Time client.
#[derive(Debug, Clone)]
pub struct BusTimeConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Routes endpoint (absolute URL)
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BusTimeConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ROUTES_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Bus Time routes endpoint.
///
/// The endpoint is validated once at construction; each fetch is a single
/// GET with no retries.
#[derive(Debug, Clone)]
pub struct BusTimeClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl BusTimeClient {
    /// Create a new Bus Time client.
    pub fn new(config: BusTimeConfig) -> Result<Self, FetchError> {
        let endpoint = parse_endpoint(&config.endpoint)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
        })
    }

    /// The configured endpoint, without the API key.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the raw route catalog body.
    ///
    /// The transport status is only logged: Bus Time reports failures
    /// through the `code` field of the payload.
    pub async fn fetch_routes(&self) -> Result<Vec<u8>, FetchError> {
        let url = with_api_key(&self.endpoint, &self.api_key);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                endpoint = %self.endpoint,
                "Bus Time returned non-success transport status"
            );
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "fetched route catalog");

        Ok(body.to_vec())
    }
}

/// Fetch the raw body at `endpoint` with `api_key` appended as `key=`.
///
/// Builds a one-off client with the default 5 second timeout.
pub async fn fetch(endpoint: &str, api_key: &str) -> Result<Vec<u8>, FetchError> {
    let config = BusTimeConfig::new(api_key).with_endpoint(endpoint);
    BusTimeClient::new(config)?.fetch_routes().await
}

/// Parse an absolute http(s) endpoint.
fn parse_endpoint(endpoint: &str) -> Result<Url, FetchError> {
    let url = Url::parse(endpoint).map_err(|e| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Append the API key, keeping any query parameters already present.
fn with_api_key(endpoint: &Url, api_key: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair(API_KEY_PARAM, api_key);
    url
}

//! Environment configuration for the server binary.

use std::path::PathBuf;

use tracing::info;

use crate::bustime::{
    BusTimeClient, BusTimeConfig, CatalogSource, DEFAULT_ROUTES_URL, DEFAULT_TIMEOUT_SECS,
    FetchError,
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration errors. The binary exits on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bus Time API key (`API_KEY`). Optional only in fixture mode.
    pub api_key: String,
    /// Routes endpoint (`BUSTIME_ROUTES_URL`)
    pub routes_url: String,
    /// Serve this file instead of calling Bus Time (`BUSTIME_FIXTURE`)
    pub fixture: Option<PathBuf>,
    /// Listen port (`PORT`)
    pub port: u16,
    /// Directory served under `/app` (`STATIC_DIR`)
    pub static_dir: PathBuf,
    /// Upstream timeout in seconds (`FETCH_TIMEOUT_SECS`)
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let fixture = var("BUSTIME_FIXTURE").map(PathBuf::from);

        let api_key = match (var("API_KEY"), &fixture) {
            (Some(key), _) => key,
            (None, Some(_)) => String::new(),
            (None, None) => return Err(ConfigError::Missing("API_KEY")),
        };

        let routes_url = var("BUSTIME_ROUTES_URL").unwrap_or_else(|| {
            info!("BUSTIME_ROUTES_URL not set, using default: {DEFAULT_ROUTES_URL}");
            DEFAULT_ROUTES_URL.to_string()
        });

        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;
        let fetch_timeout_secs =
            parse_or("FETCH_TIMEOUT_SECS", var("FETCH_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "FETCH_TIMEOUT_SECS",
                message: "must be at least 1 second".to_string(),
            });
        }

        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            api_key,
            routes_url,
            fixture,
            port,
            static_dir,
            fetch_timeout_secs,
        })
    }

    /// Bus Time client configuration.
    pub fn bustime(&self) -> BusTimeConfig {
        BusTimeConfig::new(&self.api_key)
            .with_endpoint(&self.routes_url)
            .with_timeout(self.fetch_timeout_secs)
    }

    /// The catalog source: the fixture file if set, else the live API.
    pub fn catalog_source(&self) -> Result<CatalogSource, FetchError> {
        match &self.fixture {
            Some(path) => Ok(CatalogSource::fixture(path)),
            None => Ok(CatalogSource::Live(BusTimeClient::new(self.bustime())?)),
        }
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: format!("{raw:?}: {e}"),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("API_KEY", "abc")]).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.routes_url, DEFAULT_ROUTES_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.fetch_timeout_secs, 5);
        assert!(config.fixture.is_none());
    }

    #[test]
    fn api_key_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_KEY")));

        let err = load(&[("API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_KEY")));
    }

    #[test]
    fn fixture_mode_needs_no_key() {
        let config = load(&[("BUSTIME_FIXTURE", "routes.json")]).unwrap();
        assert_eq!(config.fixture, Some(PathBuf::from("routes.json")));
        assert!(matches!(
            config.catalog_source().unwrap(),
            CatalogSource::Fixture(_)
        ));
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("API_KEY", "abc"),
            ("BUSTIME_ROUTES_URL", "http://localhost:9999/routes.json"),
            ("PORT", "8080"),
            ("STATIC_DIR", "public"),
            ("FETCH_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(config.routes_url, "http://localhost:9999/routes.json");
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("public"));

        let bustime = config.bustime();
        assert_eq!(bustime.api_key, "abc");
        assert_eq!(bustime.timeout_secs, 2);
    }

    #[test]
    fn zero_fetch_timeout_rejected() {
        let err = load(&[("API_KEY", "abc"), ("FETCH_TIMEOUT_SECS", "0")]).unwrap_err();
        match err {
            ConfigError::Invalid { key, .. } => assert_eq!(key, "FETCH_TIMEOUT_SECS"),
            other => panic!("unexpected error: {other}"),
        }

        let config = load(&[("API_KEY", "abc"), ("FETCH_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(config.fetch_timeout_secs, 1);
    }

    #[test]
    fn invalid_port() {
        let err = load(&[("API_KEY", "abc"), ("PORT", "eighty")]).unwrap_err();
        match err {
            ConfigError::Invalid { key, message } => {
                assert_eq!(key, "PORT");
                assert!(message.contains("eighty"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_routes_url_surfaces_on_source() {
        let config = load(&[("API_KEY", "abc"), ("BUSTIME_ROUTES_URL", "routes.json")]).unwrap();
        let err = config.catalog_source().unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
    }
}

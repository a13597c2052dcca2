//! Endpoint and probe result types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Errors produced while parsing an endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid endpoint URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{scheme}' in endpoint '{url}'")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Address of a JSON-RPC service.
///
/// The original text is kept as-is so it compares exactly against the
/// value persisted in the service's document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Parse an http(s) URL into an endpoint.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(raw).map_err(|source| EndpointError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self(raw.to_string())),
            scheme => Err(EndpointError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Outcome of probing one endpoint.
///
/// `latency` is `None` when the endpoint was unreachable, timed out or
/// answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub endpoint: Endpoint,
    pub latency: Option<Duration>,
}

impl ProbeResult {
    pub fn healthy(endpoint: Endpoint, latency: Duration) -> Self {
        Self {
            endpoint,
            latency: Some(latency),
        }
    }

    pub fn unhealthy(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            latency: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.latency.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_original_text() {
        let endpoint = Endpoint::parse("https://rpc.testnet-1.network/").unwrap();
        assert_eq!(endpoint.as_str(), "https://rpc.testnet-1.network/");

        let bare = Endpoint::parse("http://127.0.0.1:8545").unwrap();
        assert_eq!(bare.to_string(), "http://127.0.0.1:8545");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Endpoint::parse("rpc.testnet-1.network"),
            Err(EndpointError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Endpoint::parse("ws://rpc.testnet-1.network/"),
            Err(EndpointError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_probe_result_health() {
        let endpoint: Endpoint = "https://a.example/".parse().unwrap();
        assert!(ProbeResult::healthy(endpoint.clone(), Duration::from_millis(5)).is_healthy());
        assert!(!ProbeResult::unhealthy(endpoint).is_healthy());
    }
}

//! Store outcome and error definitions.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::health::Endpoint;

/// The endpoint value found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentEndpoint {
    Valid(Endpoint),
    /// Present but not a usable endpoint URL (empty, wrong scheme, not a
    /// string). Treated as unhealthy so the next failover overwrites it.
    Invalid(String),
}

impl CurrentEndpoint {
    pub fn as_str(&self) -> &str {
        match self {
            CurrentEndpoint::Valid(endpoint) => endpoint.as_str(),
            CurrentEndpoint::Invalid(raw) => raw,
        }
    }
}

impl fmt::Display for CurrentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful `write_endpoint` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The field already held the requested value; nothing was written.
    Unchanged,
    /// The field existed with another value and was replaced.
    Updated,
    /// The field path was absent and has been created.
    Created,
}

impl WriteOutcome {
    /// True when the document on disk was rewritten.
    pub fn changed(self) -> bool {
        !matches!(self, WriteOutcome::Unchanged)
    }
}

/// Errors that can occur while mutating the persisted document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document does not exist; the store never originates it.
    #[error("config file {} not found", .0.display())]
    ConfigMissing(PathBuf),

    /// The document could not be read or parsed, or its shape conflicts
    /// with the endpoint field path.
    #[error("config file {} is malformed: {reason}", .path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    /// Persisting the mutated document failed.
    #[error("failed to write config file {}: {source}", .path.display())]
    ConfigWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed() {
        assert!(!WriteOutcome::Unchanged.changed());
        assert!(WriteOutcome::Updated.changed());
        assert!(WriteOutcome::Created.changed());
    }

    #[test]
    fn test_current_endpoint_keeps_raw_text() {
        let valid = CurrentEndpoint::Valid(Endpoint::parse("https://rpc.testnet-1.network/").unwrap());
        assert_eq!(valid.to_string(), "https://rpc.testnet-1.network/");

        let invalid = CurrentEndpoint::Invalid("localhost:8545".to_string());
        assert_eq!(invalid.as_str(), "localhost:8545");
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::ConfigMissing(PathBuf::from("/root/rpc/config.json"));
        assert_eq!(err.to_string(), "config file /root/rpc/config.json not found");

        let err = StoreError::ConfigMalformed {
            path: PathBuf::from("config.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("line 1 column 1"));
    }
}

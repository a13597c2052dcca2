//! Settings schema definitions.
//!
//! This module defines the complete settings structure for the daemon.
//! All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::health::{Endpoint, EndpointError};

/// Root settings for the failover daemon.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Fixed candidate endpoints considered during failover, in preference order.
    pub candidates: Vec<String>,

    /// The persisted document holding the active endpoint.
    pub document: DocumentConfig,

    /// Health check settings.
    pub health_check: HealthCheckConfig,

    /// Commands used to restart the dependent service.
    pub restart: RestartConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                "https://rpc.testnet-1.network/".to_string(),
                "https://rpc.testnet-2.network/".to_string(),
                "https://rpc.testnet-3.network/".to_string(),
                "https://rpc.testnet-4.network/".to_string(),
            ],
            document: DocumentConfig::default(),
            health_check: HealthCheckConfig::default(),
            restart: RestartConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Parse the candidate list into endpoints, keeping configured order.
    pub fn candidate_endpoints(&self) -> Result<Vec<Endpoint>, EndpointError> {
        self.candidates.iter().map(|c| Endpoint::parse(c)).collect()
    }
}

/// Location of the persisted JSON document and the field of interest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the JSON document.
    pub path: PathBuf,

    /// Dotted path to the endpoint field (e.g., "wallet.nodeRpc").
    pub endpoint_field: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/root/rpc/config.json"),
            endpoint_field: "wallet.nodeRpc".to_string(),
        }
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Interval between check cycles in seconds.
    pub interval_secs: u64,

    /// Probe timeout in seconds.
    pub timeout_secs: u64,

    /// Read-only JSON-RPC method used as the probe.
    pub method: String,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            timeout_secs: 5,
            method: "eth_blockNumber".to_string(),
        }
    }
}

impl HealthCheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Restart sequence configuration.
///
/// Each phase is a list of shell commands run in `working_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Working directory for every restart command.
    pub working_dir: PathBuf,

    /// Commands that stop the dependent service.
    pub stop: Vec<String>,

    /// Commands that re-apply the service's init step.
    pub configure: Vec<String>,

    /// Commands that start the dependent service.
    pub start: Vec<String>,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("/root/rpc"),
            stop: vec!["docker-compose down -v".to_string()],
            configure: vec![
                "chmod +x init.config".to_string(),
                "./init.config".to_string(),
            ],
            start: vec!["docker-compose up -d".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when RUST_LOG is unset (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log file written alongside stdout.
    pub log_file: PathBuf,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: PathBuf::from("/root/rpc/rpc_checker.log"),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

//! Single-endpoint JSON-RPC probe.
//!
//! # Responsibilities
//! - Send one lightweight read-only JSON-RPC call
//! - Time the round trip
//! - Collapse every failure mode into an unhealthy result

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use tokio::time;

use crate::health::types::{Endpoint, ProbeResult};
use crate::observability::metrics;

/// A latency probe against one endpoint.
///
/// Implementations must not fail: every error is reported as
/// `ProbeResult { latency: None, .. }`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeResult;
}

/// Probe that POSTs a JSON-RPC request over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    method: String,
}

impl HttpProbe {
    /// Create a probe calling `method` (e.g. `eth_blockNumber`).
    pub fn new(method: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("rpc-failover-health-check")
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self::with_client(client, method)
    }

    /// Create a probe on top of an existing client.
    pub fn with_client(client: reqwest::Client, method: impl Into<String>) -> Self {
        Self {
            client,
            method: method.into(),
        }
    }

    fn request_body(&self) -> serde_json::Value {
        json!({
            "jsonrpc": "2.0",
            "method": self.method,
            "params": [],
            "id": 1,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeResult {
        let start = Instant::now();
        let response_future = self
            .client
            .post(endpoint.as_str())
            .timeout(timeout)
            .json(&self.request_body())
            .send();

        let latency = match time::timeout(timeout, response_future).await {
            Ok(Ok(response)) => {
                let elapsed = start.elapsed();
                let status = response.status();
                if status.is_success() {
                    Some(elapsed)
                } else {
                    tracing::debug!(endpoint = %endpoint, status = %status, "Probe failed: non-success status");
                    None
                }
            }
            Ok(Err(e)) => {
                tracing::debug!(endpoint = %endpoint, error = %e, "Probe failed: request error");
                None
            }
            Err(_) => {
                tracing::debug!(endpoint = %endpoint, timeout_ms = timeout.as_millis() as u64, "Probe failed: timeout");
                None
            }
        };

        metrics::record_probe(endpoint.as_str(), latency);

        ProbeResult {
            endpoint: endpoint.clone(),
            latency,
        }
    }
}

//! Metrics collection.
//!
//! # Metrics
//! - `rpc_failover_probe_total` (counter): probes by result (healthy/unhealthy)
//! - `rpc_failover_probe_latency_seconds` (histogram): latency of healthy probes
//! - `rpc_failover_endpoint_health` (gauge): 1=healthy, 0=unhealthy, per endpoint
//! - `rpc_failover_cycles_total` (counter): check cycles by outcome
//! - `rpc_failover_switches_total` (counter): endpoint switches written to disk
//! - `rpc_failover_restart_step_failures_total` (counter): failed restart steps by step
//!
//! # Design Decisions
//! - Recorded through the facade; `init_metrics` installs the Prometheus
//!   exporter when `observability.metrics_enabled` is set
//! - Endpoint labels are bounded by the fixed candidate list

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the global Prometheus recorder and its scrape listener.
///
/// Must be called from within the tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(endpoint: &str, latency: Option<Duration>) {
    let result = if latency.is_some() { "healthy" } else { "unhealthy" };
    metrics::counter!("rpc_failover_probe_total", "result" => result).increment(1);
    metrics::gauge!("rpc_failover_endpoint_health", "endpoint" => endpoint.to_string())
        .set(if latency.is_some() { 1.0 } else { 0.0 });

    if let Some(latency) = latency {
        metrics::histogram!("rpc_failover_probe_latency_seconds").record(latency.as_secs_f64());
    }
}

pub fn record_cycle(outcome: &'static str) {
    metrics::counter!("rpc_failover_cycles_total", "outcome" => outcome).increment(1);
}

pub fn record_switch() {
    metrics::counter!("rpc_failover_switches_total").increment(1);
}

pub fn record_restart_step_failure(step: &'static str) {
    metrics::counter!("rpc_failover_restart_step_failures_total", "step" => step).increment(1);
}

//! RPC failover daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          rpc-failover                            │
//!   │                                                                  │
//!   │  ┌───────────┐   tick   ┌──────────────────────┐                 │
//!   │  │ scheduler │────────▶│ failover controller  │                 │
//!   │  └───────────┘          └─────┬──────┬──────┬──┘                 │
//!   │                               │      │      │                    │
//!   │              probe current /  │      │      │ restart            │
//!   │              select best      ▼      │      ▼                    │
//!   │                        ┌─────────┐   │  ┌──────────────────┐     │
//!   │   JSON-RPC endpoints ◀─│ health  │   │  │ service (sh -c)  │──▶ docker-compose
//!   │                        └─────────┘   ▼  └──────────────────┘     │
//!   │                                 ┌─────────┐                      │
//!   │                                 │  store  │──▶ config.json       │
//!   │                                 └─────────┘                      │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Settings come from the TOML file named by `RPC_FAILOVER_CONFIG`, or
//! built-in defaults when it is unset.

use rpc_failover::config;
use rpc_failover::failover::{run_loop, IntervalTicker};
use rpc_failover::lifecycle::{signals, startup, Shutdown};
use rpc_failover::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;

    let _log_guard = observability::init_logging(&config.observability);

    tracing::info!("rpc-failover v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        interval_secs = config.health_check.interval_secs,
        timeout_secs = config.health_check.timeout_secs,
        method = %config.health_check.method,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = observability::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let controller = startup::build_controller(&config)?;

    let shutdown = Shutdown::new();
    let loop_shutdown = shutdown.subscribe();

    let ticker = IntervalTicker::new(config.health_check.interval());
    let daemon = run_loop(&controller, ticker, loop_shutdown);
    tokio::pin!(daemon);

    let cycles = tokio::select! {
        cycles = &mut daemon => cycles,
        _ = signals::wait_for_termination() => {
            shutdown.trigger();
            daemon.await
        }
    };

    tracing::info!(cycles, "Shutdown complete");
    Ok(())
}

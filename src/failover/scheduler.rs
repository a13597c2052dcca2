//! Cycle scheduling.
//!
//! # Responsibilities
//! - Decide when the next check cycle starts (`Ticker`)
//! - Drive cycles until shutdown is signalled
//!
//! # Design Decisions
//! - The first tick fires immediately; later ticks wait a full interval
//!   after the previous cycle finished, so slow cycles never overlap
//! - Shutdown is observed between cycles, never in the middle of one

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time;

use crate::failover::controller::FailoverController;
use crate::health::Probe;
use crate::service::ServiceController;

/// Source of cycle start events.
#[async_trait]
pub trait Ticker: Send {
    /// Resolve when the next cycle should start.
    async fn tick(&mut self);
}

/// Production ticker: immediate first tick, then a fixed pause.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    first: bool,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            first: true,
        }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        if self.first {
            self.first = false;
            return;
        }
        tracing::info!(
            interval_secs = self.period.as_secs(),
            "Waiting until next check"
        );
        time::sleep(self.period).await;
    }
}

/// Run check cycles on every tick until `shutdown` fires.
///
/// Returns the number of completed cycles.
pub async fn run_loop<P, S, T>(
    controller: &FailoverController<P, S>,
    mut ticker: T,
    mut shutdown: broadcast::Receiver<()>,
) -> u64
where
    P: Probe,
    S: ServiceController,
    T: Ticker,
{
    tracing::info!(
        candidates = controller.candidates().len(),
        document = %controller.store().path().display(),
        "RPC failover loop starting"
    );

    let mut cycles = 0u64;
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!(cycles, "RPC failover loop received shutdown signal, exiting loop");
                break;
            }
            _ = ticker.tick() => {
                let outcome = controller.run_cycle().await;
                tracing::debug!(outcome = outcome.label(), "Check cycle finished");
                cycles += 1;
            }
        }
    }

    cycles
}

//! Check cycle orchestration.

use std::time::Duration;

use crate::health::{select_best, Endpoint, Probe};
use crate::observability::metrics;
use crate::service::{restart, RestartReport, ServiceController};
use crate::store::{CurrentEndpoint, EndpointStore};

/// What a single check cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The current endpoint could not be read from the document.
    NoCurrentEndpoint,
    /// The current endpoint answered; nothing to do.
    Healthy { endpoint: Endpoint, latency: Duration },
    /// The current endpoint failed and no candidate answered.
    NoCandidate { current: CurrentEndpoint },
    /// The best candidate is already the persisted value.
    Unchanged { endpoint: Endpoint },
    /// The document could not be updated; no restart was attempted.
    WriteFailed { candidate: Endpoint },
    /// The document now points at `to` and the service was restarted.
    FailedOver {
        from: CurrentEndpoint,
        to: Endpoint,
        restart: RestartReport,
    },
}

impl CycleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::NoCurrentEndpoint => "no_current_endpoint",
            CycleOutcome::Healthy { .. } => "healthy",
            CycleOutcome::NoCandidate { .. } => "no_candidate",
            CycleOutcome::Unchanged { .. } => "unchanged",
            CycleOutcome::WriteFailed { .. } => "write_failed",
            CycleOutcome::FailedOver { .. } => "failed_over",
        }
    }
}

/// Probes the configured endpoint and fails over to the fastest candidate.
pub struct FailoverController<P, S> {
    probe: P,
    service: S,
    store: EndpointStore,
    candidates: Vec<Endpoint>,
    probe_timeout: Duration,
}

impl<P, S> FailoverController<P, S>
where
    P: Probe,
    S: ServiceController,
{
    pub fn new(
        probe: P,
        service: S,
        store: EndpointStore,
        candidates: Vec<Endpoint>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            service,
            store,
            candidates,
            probe_timeout,
        }
    }

    pub fn store(&self) -> &EndpointStore {
        &self.store
    }

    pub fn candidates(&self) -> &[Endpoint] {
        &self.candidates
    }

    /// Run one check cycle to completion.
    pub async fn run_cycle(&self) -> CycleOutcome {
        tracing::info!("Starting RPC check");
        let outcome = self.check().await;
        metrics::record_cycle(outcome.label());
        outcome
    }

    async fn check(&self) -> CycleOutcome {
        let Some(current) = self.store.read_current_endpoint() else {
            tracing::error!("Could not determine current RPC, skipping cycle");
            return CycleOutcome::NoCurrentEndpoint;
        };

        if let CurrentEndpoint::Valid(endpoint) = &current {
            let result = self.probe.probe(endpoint, self.probe_timeout).await;
            if let Some(latency) = result.latency {
                tracing::info!(
                    endpoint = %endpoint,
                    latency_ms = latency.as_millis() as u64,
                    "Current RPC is available, no changes required"
                );
                return CycleOutcome::Healthy {
                    endpoint: endpoint.clone(),
                    latency,
                };
            }
        }

        tracing::warn!(endpoint = %current, "Current RPC is unavailable, searching for an alternative");

        let Some(best) = select_best(&self.probe, &self.candidates, self.probe_timeout).await else {
            tracing::warn!("No available RPC found");
            return CycleOutcome::NoCandidate { current };
        };

        tracing::info!(endpoint = %best, "Found best available RPC");

        match self.store.write_endpoint(&best) {
            Ok(outcome) if outcome.changed() => {
                metrics::record_switch();
                let report = restart(&self.service).await;
                if report.is_clean() {
                    tracing::info!(from = %current, to = %best, "Switched to new RPC");
                } else {
                    tracing::warn!(
                        from = %current,
                        to = %best,
                        failed_steps = ?report.failed_steps(),
                        "Switched to new RPC, restart completed with failures"
                    );
                }
                CycleOutcome::FailedOver {
                    from: current,
                    to: best,
                    restart: report,
                }
            }
            Ok(_) => {
                tracing::info!(endpoint = %best, "Configuration unchanged, restart not required");
                CycleOutcome::Unchanged { endpoint: best }
            }
            Err(e) => {
                tracing::error!(endpoint = %best, error = %e, "Failed to update configuration, restart skipped");
                CycleOutcome::WriteFailed { candidate: best }
            }
        }
    }
}

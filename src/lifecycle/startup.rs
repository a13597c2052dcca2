//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn validated settings into a ready-to-run failover controller
//!
//! # Design Decisions
//! - Fail fast: settings that cannot be turned into components are fatal
//! - Components are built once and injected; nothing reads globals

use thiserror::Error;

use crate::config::DaemonConfig;
use crate::failover::FailoverController;
use crate::health::{EndpointError, HttpProbe};
use crate::service::ShellServiceController;
use crate::store::EndpointStore;

/// Errors that prevent the daemon from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid candidate endpoint: {0}")]
    Candidate(#[from] EndpointError),
}

/// Controller wired with the production probe and service controller.
pub type DaemonController = FailoverController<HttpProbe, ShellServiceController>;

/// Build the production controller from settings.
pub fn build_controller(config: &DaemonConfig) -> Result<DaemonController, StartupError> {
    let candidates = config.candidate_endpoints()?;

    let controller = FailoverController::new(
        HttpProbe::new(config.health_check.method.clone()),
        ShellServiceController::new(&config.restart),
        EndpointStore::from_config(&config.document),
        candidates,
        config.health_check.timeout(),
    );

    tracing::info!(
        document = %config.document.path.display(),
        field = %config.document.endpoint_field,
        working_dir = %config.restart.working_dir.display(),
        candidates = config.candidates.len(),
        "Failover controller initialized"
    );

    Ok(controller)
}

//! Service controller abstraction and the restart sequence.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::RestartConfig;
use crate::observability::metrics;
use crate::service::sequence::run_sequence;

/// One phase of a service restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartStep {
    Stop,
    Configure,
    Start,
}

impl RestartStep {
    /// Execution order of a restart.
    pub const ALL: [RestartStep; 3] = [RestartStep::Stop, RestartStep::Configure, RestartStep::Start];

    pub fn as_str(self) -> &'static str {
        match self {
            RestartStep::Stop => "stop",
            RestartStep::Configure => "configure",
            RestartStep::Start => "start",
        }
    }
}

impl fmt::Display for RestartStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by a service controller step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestartError {
    #[error("{step} step failed: {failed} of {total} commands did not succeed")]
    StepFailed {
        step: RestartStep,
        failed: usize,
        total: usize,
    },
}

/// Controls the service that consumes the endpoint document.
#[async_trait]
pub trait ServiceController: Send + Sync {
    async fn stop(&self) -> Result<(), RestartError>;
    async fn configure(&self) -> Result<(), RestartError>;
    async fn start(&self) -> Result<(), RestartError>;
}

/// Service controller that shells out to configured commands.
#[derive(Debug, Clone)]
pub struct ShellServiceController {
    working_dir: PathBuf,
    stop: Vec<String>,
    configure: Vec<String>,
    start: Vec<String>,
}

impl ShellServiceController {
    pub fn new(config: &RestartConfig) -> Self {
        Self {
            working_dir: config.working_dir.clone(),
            stop: config.stop.clone(),
            configure: config.configure.clone(),
            start: config.start.clone(),
        }
    }

    async fn run_step(&self, step: RestartStep, commands: &[String]) -> Result<(), RestartError> {
        let report = run_sequence(commands, &self.working_dir).await;
        if report.all_succeeded() {
            Ok(())
        } else {
            Err(RestartError::StepFailed {
                step,
                failed: report.failure_count(),
                total: report.steps.len(),
            })
        }
    }
}

#[async_trait]
impl ServiceController for ShellServiceController {
    async fn stop(&self) -> Result<(), RestartError> {
        self.run_step(RestartStep::Stop, &self.stop).await
    }

    async fn configure(&self) -> Result<(), RestartError> {
        self.run_step(RestartStep::Configure, &self.configure).await
    }

    async fn start(&self) -> Result<(), RestartError> {
        self.run_step(RestartStep::Start, &self.start).await
    }
}

/// Results of each restart step, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    pub steps: Vec<(RestartStep, Result<(), RestartError>)>,
}

impl RestartReport {
    pub fn is_clean(&self) -> bool {
        self.steps.iter().all(|(_, result)| result.is_ok())
    }

    pub fn failed_steps(&self) -> Vec<RestartStep> {
        self.steps
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(step, _)| *step)
            .collect()
    }
}

/// Stop, re-configure and start the service, attempting every step.
pub async fn restart<C>(controller: &C) -> RestartReport
where
    C: ServiceController + ?Sized,
{
    let mut steps = Vec::with_capacity(RestartStep::ALL.len());

    for step in RestartStep::ALL {
        let result = match step {
            RestartStep::Stop => controller.stop().await,
            RestartStep::Configure => controller.configure().await,
            RestartStep::Start => controller.start().await,
        };

        if let Err(e) = &result {
            tracing::error!(step = %step, error = %e, "Restart step failed, continuing");
            metrics::record_restart_step_failure(step.as_str());
        }
        steps.push((step, result));
    }

    RestartReport { steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    /// Records calls; fails the steps listed in `failing`.
    struct RecordingController {
        calls: Mutex<Vec<RestartStep>>,
        failing: Vec<RestartStep>,
    }

    impl RecordingController {
        fn new(failing: Vec<RestartStep>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing,
            }
        }

        fn record(&self, step: RestartStep) -> Result<(), RestartError> {
            self.calls.lock().unwrap().push(step);
            if self.failing.contains(&step) {
                Err(RestartError::StepFailed { step, failed: 1, total: 1 })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ServiceController for RecordingController {
        async fn stop(&self) -> Result<(), RestartError> {
            self.record(RestartStep::Stop)
        }
        async fn configure(&self) -> Result<(), RestartError> {
            self.record(RestartStep::Configure)
        }
        async fn start(&self) -> Result<(), RestartError> {
            self.record(RestartStep::Start)
        }
    }

    #[tokio::test]
    async fn test_restart_runs_all_steps_in_order() {
        let controller = RecordingController::new(vec![RestartStep::Stop, RestartStep::Configure]);
        let report = restart(&controller).await;

        assert_eq!(*controller.calls.lock().unwrap(), RestartStep::ALL.to_vec());
        assert!(!report.is_clean());
        assert_eq!(report.failed_steps(), vec![RestartStep::Stop, RestartStep::Configure]);
    }

    #[tokio::test]
    async fn test_shell_controller_continues_after_failed_step() {
        let dir = tempfile::tempdir().unwrap();
        let config = RestartConfig {
            working_dir: dir.path().to_path_buf(),
            stop: vec!["echo stop >> trail".to_string(), "exit 1".to_string()],
            configure: vec!["echo configure >> trail".to_string()],
            start: vec!["echo start >> trail".to_string()],
        };
        let controller = ShellServiceController::new(&config);

        let report = restart(&controller).await;

        assert_eq!(report.failed_steps(), vec![RestartStep::Stop]);
        assert_eq!(
            report.steps[0].1,
            Err(RestartError::StepFailed {
                step: RestartStep::Stop,
                failed: 1,
                total: 2
            })
        );
        let trail = fs::read_to_string(dir.path().join("trail")).unwrap();
        assert_eq!(trail, "stop\nconfigure\nstart\n");
    }
}

//! Ordered shell command execution.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// How a single command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// Non-zero exit; `code` is `None` when killed by a signal.
    Failed { code: Option<i32> },
    /// The shell could not be started at all.
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub command: String,
    pub status: StepStatus,
    /// Captured stdout, lossily decoded. Empty when the spawn failed.
    pub stdout: String,
    pub stderr: String,
}

/// Per-command results of one `run_sequence` call, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub steps: Vec<StepReport>,
}

impl SequenceReport {
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Succeeded)
    }

    pub fn failure_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status != StepStatus::Succeeded)
            .count()
    }
}

/// Run `commands` one after another in `working_dir`.
///
/// Every command is attempted; failures are logged and recorded.
pub async fn run_sequence(commands: &[String], working_dir: &Path) -> SequenceReport {
    let mut report = SequenceReport::default();
    for command in commands {
        report.steps.push(run_command(command, working_dir).await);
    }
    report
}

async fn run_command(command: &str, working_dir: &Path) -> StepReport {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(
                command = %command,
                working_dir = %working_dir.display(),
                error = %e,
                "Failed to spawn command"
            );
            return StepReport {
                command: command.to_string(),
                status: StepStatus::SpawnFailed(e.to_string()),
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();

    let status = if output.status.success() {
        tracing::info!(command = %command, stdout = %stdout, stderr = %stderr, "Executed command");
        StepStatus::Succeeded
    } else {
        let code = output.status.code();
        tracing::error!(
            command = %command,
            exit_code = ?code,
            stdout = %stdout,
            stderr = %stderr,
            "Command failed"
        );
        StepStatus::Failed { code }
    };

    StepReport {
        command: command.to_string(),
        status,
        stdout,
        stderr,
    }
}

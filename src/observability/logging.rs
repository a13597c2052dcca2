//! Structured logging.
//!
//! Events go to stdout (with ANSI colors) and to the configured log file
//! (plain text). `RUST_LOG` overrides the configured level.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ObservabilityConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Build the default filter directive for a configured level.
pub fn filter_directive(log_level: &str) -> String {
    format!("rpc_failover={}", log_level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process. `None` means file logging is unavailable and
/// only stdout is used.
pub fn init_logging(config: &ObservabilityConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter_directive(&config.log_level).into());

    let mut guard = None;
    let mut file_error = None;

    let file_layer = match open_log_file(&config.log_file) {
        Ok(appender) => {
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter.clone()),
            )
        }
        Err(e) => {
            file_error = Some(e);
            None
        }
    };

    let console_layer = tracing_subscriber::fmt::layer().with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!(
            log_file = %config.log_file.display(),
            error = %e,
            "Log file unavailable, logging to stdout only"
        );
    }

    guard
}

/// Open `log_file` for appending, creating its directory if needed.
fn open_log_file(log_file: &Path) -> Result<RollingFileAppender, BoxError> {
    let dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("invalid log file name: {}", log_file.display()))?;

    fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?;
    Ok(appender)
}

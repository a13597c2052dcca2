//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events: stdout + log file)
//!     → metrics.rs (counters, gauges, histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (endpoint, step, error)
//! - File output is non-blocking; its guard lives as long as the daemon
//! - Metrics go through the facade; the daemon installs the Prometheus
//!   exporter only when enabled in settings

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use self::metrics::init_metrics;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load settings → Validate → Build probe, store, service controller
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → daemon loop exits after current cycle
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Only invalid settings are fatal; everything after startup is cycle-local
//! - A cycle in progress is never interrupted

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;

//! RPC endpoint health monitoring with list-based failover.

pub mod config;
pub mod failover;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod service;
pub mod store;

pub use config::schema::DaemonConfig;
pub use failover::{CycleOutcome, FailoverController};
pub use lifecycle::Shutdown;

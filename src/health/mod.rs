//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Current endpoint:
//!     probe.rs (one JSON-RPC call, timed)
//!     → ProbeResult { latency: Some | None }
//!
//! Failover candidates (selector.rs):
//!     fan out probe.rs over every candidate
//!     → keep healthy results
//!     → lowest latency wins, list order breaks ties
//! ```
//!
//! # Design Decisions
//! - Probes never fail: every error collapses to "no latency"
//! - Each probe carries its own deadline, so a fan-out waits ~timeout, not timeout × N
//! - Selection is deterministic (no shuffling, no randomness)

pub mod probe;
pub mod selector;
pub mod types;

pub use probe::{HttpProbe, Probe};
pub use selector::{fastest, select_best};
pub use types::{Endpoint, EndpointError, ProbeResult};

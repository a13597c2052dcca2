//! Failover decision engine.
//!
//! # State Machine
//! ```text
//! Idle → ProbeCurrent ─┬─ healthy ──────────────→ Satisfied ─→ Idle
//!                      └─ unhealthy → SelectCandidate
//!                                      ├─ none ─────────────→ Idle
//!                                      └─ best → write store
//!                                                 ├─ changed → ApplyFailover (restart) → Idle
//!                                                 └─ unchanged / error ───────────────→ Idle
//! ```
//!
//! # Design Decisions
//! - One cycle runs to completion before the scheduler waits again
//! - Nothing inside a cycle can stop the loop; failures end the cycle only
//! - Only members of the candidate list are ever written

pub mod controller;
pub mod scheduler;

pub use controller::{CycleOutcome, FailoverController};
pub use scheduler::{run_loop, IntervalTicker, Ticker};

//! Dependent service restart subsystem.
//!
//! # Data Flow
//! ```text
//! Confirmed config change
//!     → controller.rs restart(): stop → configure → start
//!     → ShellServiceController: each step runs its command list
//!     → sequence.rs run_sequence(): sh -c <command> in working dir
//! ```
//!
//! # Design Decisions
//! - Best effort: a failing command or step never stops the ones after it
//! - No rollback of partially applied steps
//! - Output is captured and logged, never interpreted

pub mod controller;
pub mod sequence;

pub use controller::{restart, RestartError, RestartReport, RestartStep, ServiceController, ShellServiceController};
pub use sequence::{run_sequence, SequenceReport, StepReport, StepStatus};

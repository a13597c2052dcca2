//! Persisted endpoint store.
//!
//! # Data Flow
//! ```text
//! read:   document (JSON) → field path lookup
//!             URL     → Valid(Endpoint)
//!             other   → Invalid(raw text)
//!             absent  → None (logged)
//!
//! write:  document (JSON) → parse whole document
//!         → compare field with new endpoint
//!             equal   → Unchanged (no disk access beyond the read)
//!             differs → Updated
//!             absent  → Created (nested objects materialized)
//!         → serialize whole document → temp file → rename over original
//! ```
//!
//! # Design Decisions
//! - The store never creates the document; a missing file is an error
//! - Unrelated fields survive untouched and in their original order
//! - Idempotent writes are reported distinctly so callers can skip restarts
//! - Single writer assumed; there is no locking

pub mod document;
pub mod types;

pub use document::EndpointStore;
pub use types::{CurrentEndpoint, StoreError, StoreResult, WriteOutcome};

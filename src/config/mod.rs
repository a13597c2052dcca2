//! Daemon settings subsystem.
//!
//! # Data Flow
//! ```text
//! RPC_FAILOVER_CONFIG (env) → settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DaemonConfig (validated, immutable)
//!     → injected into every component at startup
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no hot reload
//! - All fields have defaults so an absent or minimal file still works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError, CONFIG_ENV_VAR};
pub use schema::DaemonConfig;
pub use schema::DocumentConfig;
pub use schema::HealthCheckConfig;
pub use schema::ObservabilityConfig;
pub use schema::RestartConfig;

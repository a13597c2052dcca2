//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every candidate is a well-formed URL, listed once
//! - Validate value ranges (interval and timeout > 0)
//! - Metrics address parses when the exporter is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DaemonConfig → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::DaemonConfig;
use crate::health::Endpoint;

/// A single semantic problem with the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("candidate list is empty")]
    NoCandidates,

    #[error("candidate '{0}' is not a valid URL")]
    InvalidCandidate(String),

    #[error("candidate '{0}' is listed more than once")]
    DuplicateCandidate(String),

    #[error("health_check.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("health_check.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("health_check.method must not be empty")]
    EmptyMethod,

    #[error("document.endpoint_field '{0}' is not a valid dotted path")]
    InvalidFieldPath(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &DaemonConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.candidates.is_empty() {
        errors.push(ValidationError::NoCandidates);
    }

    let mut seen = HashSet::new();
    for candidate in &config.candidates {
        if Endpoint::parse(candidate).is_err() {
            errors.push(ValidationError::InvalidCandidate(candidate.clone()));
        }
        if !seen.insert(candidate.as_str()) {
            errors.push(ValidationError::DuplicateCandidate(candidate.clone()));
        }
    }

    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.health_check.method.trim().is_empty() {
        errors.push(ValidationError::EmptyMethod);
    }

    let field = &config.document.endpoint_field;
    if field.is_empty() || field.split('.').any(str::is_empty) {
        errors.push(ValidationError::InvalidFieldPath(field.clone()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

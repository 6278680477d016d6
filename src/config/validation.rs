//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, sizes and timeouts
//! - Check the store backend has what it needs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, StoreBackend};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address \"{value}\"")]
    InvalidAddress { field: &'static str, value: String },

    #[error("store.path is required when store.backend = \"file\"")]
    MissingStorePath,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.store.backend == StoreBackend::File
        && config.store.path.as_deref().map_or(true, str::is_empty)
    {
        errors.push(ValidationError::MissingStorePath);
    }

    if config.management.max_body_size == 0 {
        errors.push(ValidationError::Zero("management.max_body_size"));
    }

    let timeouts = [
        ("forward.connect_timeout_secs", config.forward.connect_timeout_secs),
        ("forward.timeout_secs", config.forward.timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in timeouts {
        if value == Some(0) {
            errors.push(ValidationError::Zero(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

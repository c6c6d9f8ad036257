//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the backend endpoint is a plain-HTTP URL with a host
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("listener.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("backend.url {0:?} must use the http scheme")]
    BackendScheme(String),

    #[error("backend.url {0:?} has no host")]
    BackendMissingHost(String),

    #[error("backend.timeout_secs must be greater than zero")]
    ZeroBackendTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    // The outbound client speaks plain HTTP; TLS toward the backend is out
    // of scope, so reject https here rather than failing per request.
    if config.backend.url.scheme() != "http" {
        errors.push(ValidationError::BackendScheme(
            config.backend.url.to_string(),
        ));
    }
    if config.backend.url.host_str().is_none() {
        errors.push(ValidationError::BackendMissingHost(
            config.backend.url.to_string(),
        ));
    }
    if config.backend.timeout_secs == 0 {
        errors.push(ValidationError::ZeroBackendTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and `Origin` parsing handle syntax)
//! - Require port and origin when the proxy is going to serve
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Skipped entirely in clear-cache mode, which never binds a listener

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("--port is required when not using --clear-cache")]
    MissingPort,

    #[error("port 0 is not a valid listen port")]
    InvalidPort,

    #[error("--origin is required when not using --clear-cache")]
    MissingOrigin,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.listener.port {
        None => errors.push(ValidationError::MissingPort),
        Some(0) => errors.push(ValidationError::InvalidPort),
        Some(_) => {}
    }

    if config.origin.is_none() {
        errors.push(ValidationError::MissingOrigin);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration validation.
//!
//! Serde handles the syntax; this pass checks values: addresses parse, the
//! upstream URL is absolute, timeouts are positive and the inbound deadline
//! leaves room for the whole retry window. Every problem is reported, not just
//! the first.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::FacadeConfig;
use crate::resilience::RetryPolicy;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: {0}")]
    InvalidUpstreamUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error(
        "timeouts.request_secs ({request_secs}s) must exceed the worst-case retry window ({window_secs}s)"
    )]
    RetryWindowExceedsTimeout { request_secs: u64, window_secs: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FacadeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidUpstreamUrl(format!(
            "unsupported scheme '{}'",
            url.scheme()
        ))),
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl(e.to_string())),
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::Zero("retries.max_attempts"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.request_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.retries.max_attempts > 0 && config.timeouts.request_secs > 0 {
        let policy = RetryPolicy::from_config(&config.retries);
        let window = policy.worst_case_wait()
            + Duration::from_secs(config.upstream.request_timeout_secs)
                * config.retries.max_attempts;
        if Duration::from_secs(config.timeouts.request_secs) <= window {
            errors.push(ValidationError::RetryWindowExceedsTimeout {
                request_secs: config.timeouts.request_secs,
                window_secs: window.as_secs(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

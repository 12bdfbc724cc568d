//! Configuration validation.
//!
//! Only the listener address and the intervals are checked. The GitHub triple
//! is deliberately left alone: empty or odd values go straight upstream.

use std::net::SocketAddr;

use crate::config::schema::PullerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid listener.bind_address '{0}'")]
    BindAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &PullerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.watcher.period_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("watcher.period_ms"));
    }

    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

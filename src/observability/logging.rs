//! Structured logging.
//!
//! Uses `tracing` with an `EnvFilter`: `RUST_LOG` wins, otherwise the
//! configured level applies to this crate and `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default filter directive for `level`.
pub fn default_directive(level: &str) -> String {
    format!("issue_puller={level},tower_http={level}")
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

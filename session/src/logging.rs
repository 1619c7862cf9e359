//! Tracing setup for the client core.
//!
//! The subscriber is built from [`ClientConfig`]: `log_format` selects the
//! output shape and `log_level` seeds the filter. A `RUST_LOG` environment
//! variable, when present, overrides the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use veriflow_types::KycError;

use crate::config::ClientConfig;

/// Output shape for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for local development.
    Human,
    /// Newline-delimited JSON for log aggregation.
    Json,
}

/// Install the global tracing subscriber from the client configuration.
///
/// Returns [`KycError::Config`] when a subscriber is already installed, so
/// an embedding application that sets up its own tracing sees the clash as
/// an error instead of a panic.
pub fn init_logging(config: &ClientConfig) -> Result<(), KycError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format() {
        LogFormat::Human => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true))
            .try_init(),
    }
    .map_err(|e| KycError::Config(format!("tracing subscriber already installed: {e}")))
}

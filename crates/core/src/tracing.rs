//! Initialization functions for tracing

use crate::config::LoggingSettings;
use crate::{CoreError, CoreResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` first, then the configured level, then `info`
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing with a stderr formatting layer
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_tracing(settings: &LoggingSettings) -> CoreResult<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CoreError::invalid_config(format!("failed to install subscriber: {e}")))
}

//! Process-wide `tracing` subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::options::LogFormat;

/// Installs the global subscriber.
///
/// `filter` uses `EnvFilter` directive syntax (e.g. `info,httplog=debug`);
/// an invalid filter falls back to `info`. [`LogFormat::Json`] writes one
/// JSON object per line, [`LogFormat::Text`] human-readable lines.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(filter: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}. Falling back to 'info'", filter, e);
        EnvFilter::new("info")
    });

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow!("failed to install subscriber: {e}")),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| anyhow!("failed to install subscriber: {e}")),
    }
}

//! Tracing initialization for embedding applications.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console telemetry.
///
/// Respects `RUST_LOG` when set; defaults to info-level output with debug
/// detail for the giotto crates.
///
/// # Returns
///
/// Result indicating success or failure of initialization. Fails when a
/// global subscriber is already installed.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,giotto=debug,giotto_models=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized (console mode)");
    Ok(())
}

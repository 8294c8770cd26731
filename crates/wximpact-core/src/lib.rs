pub mod config;
pub mod error;

pub use config::{Config, ExtentConfig, LayerEntry, MapConfig, ServiceConfig, ValidationResult};
pub use error::{AppError, ConfigError};

/// Initialize the core application
pub fn init() -> Result<(), AppError> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!("wximpact core initialized");
    Ok(())
}

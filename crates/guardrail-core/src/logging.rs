//! Logging setup
//!
//! Structured logging through `tracing`. `RUST_LOG` takes precedence over the
//! configured level when set.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (e.g., "info", "debug", "trace")
    pub level: String,
    /// Whether to use JSON format (vs. human-readable)
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            json: config.json,
        }
    }
}

/// Install the global subscriber.
///
/// Only the first call in a process takes effect; later calls are ignored
/// so tests and embedders can call it freely.
///
/// # Example
///
/// ```
/// use guardrail_core::logging::{init_logging, LogConfig};
///
/// init_logging(LogConfig {
///     level: "debug".to_string(),
///     json: false,
/// });
/// ```
pub fn init_logging(config: LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!("Logging initialized at level: {}", config.level);
    }
}

//! Node configuration
//!
//! Settings are read from a configuration file (TOML, JSON or YAML, chosen by
//! extension) with environment overrides under the `GUARDRAIL` prefix, e.g.
//! `GUARDRAIL__STREAMING__INTER_DC_STREAM_THROUGHPUT_MBITS=200`.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "GUARDRAIL";

/// Main configuration for a node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Streaming throughput caps
    #[serde(default)]
    pub streaming: StreamingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Inter-datacenter streaming caps, in megabits per second.
///
/// A value of zero or below means the stream is not throttled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    #[serde(default = "default_inter_dc_throughput")]
    pub inter_dc_stream_throughput_mbits: i32,

    #[serde(default = "default_inter_dc_throughput")]
    pub entire_sstable_inter_dc_stream_throughput_mbits: i32,
}

fn default_inter_dc_throughput() -> i32 {
    200
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            inter_dc_stream_throughput_mbits: default_inter_dc_throughput(),
            entire_sstable_inter_dc_stream_throughput_mbits: default_inter_dc_throughput(),
        }
    }
}

impl StreamingConfig {
    /// Cap for either regular or entire-SSTable streaming, `None` if unlimited
    pub fn inter_dc_throughput(&self, entire_sstable: bool) -> Option<i32> {
        let mbits = if entire_sstable {
            self.entire_sstable_inter_dc_stream_throughput_mbits
        } else {
            self.inter_dc_stream_throughput_mbits
        };
        (mbits > 0).then_some(mbits)
    }

    /// Operator-facing line describing the current inter-DC cap
    pub fn describe_inter_dc_throughput(&self, entire_sstable: bool) -> String {
        let throughput = match self.inter_dc_throughput(entire_sstable) {
            Some(mbits) => format!("{} Mb/s", mbits),
            None => "unlimited".to_string(),
        };
        format!(
            "Current {}inter-datacenter stream throughput: {}",
            if entire_sstable { "entire SSTable " } else { "" },
            throughput
        )
    }
}

/// Build the layered settings for a configuration file.
///
/// Other crates use this to pull their own sections out of the same file.
pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<config::Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoreError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings)
}

/// Load node configuration from a file
///
/// # Example
///
/// ```no_run
/// use guardrail_core::config::load_config;
///
/// let config = load_config("node.toml").unwrap();
/// println!("Log level: {}", config.logging.level);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    let path = path.as_ref();
    let config: NodeConfig = read_settings(path)?.try_deserialize()?;

    tracing::info!("Configuration loaded from {}", path.display());

    Ok(config)
}

/// Load configuration with defaults if the file is missing or unreadable
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> NodeConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            NodeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.streaming.inter_dc_stream_throughput_mbits, 200);
    }

    #[test]
    fn test_describe_limited_throughput() {
        let streaming = StreamingConfig {
            inter_dc_stream_throughput_mbits: 150,
            entire_sstable_inter_dc_stream_throughput_mbits: 0,
        };
        assert_eq!(
            streaming.describe_inter_dc_throughput(false),
            "Current inter-datacenter stream throughput: 150 Mb/s"
        );
        assert_eq!(
            streaming.describe_inter_dc_throughput(true),
            "Current entire SSTable inter-datacenter stream throughput: unlimited"
        );
    }

    #[test]
    fn test_negative_throughput_is_unlimited() {
        let streaming = StreamingConfig {
            inter_dc_stream_throughput_mbits: -1,
            ..Default::default()
        };
        assert_eq!(streaming.inter_dc_throughput(false), None);
        assert_eq!(streaming.inter_dc_throughput(true), Some(200));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "logging": { "level": "debug", "json": true },
            "streaming": { "inter_dc_stream_throughput_mbits": 50 }
        }"#;

        let config: NodeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.streaming.inter_dc_stream_throughput_mbits, 50);
        assert_eq!(
            config.streaming.entire_sstable_inter_dc_stream_throughput_mbits,
            200
        );
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[logging]\nlevel = \"warn\"\n\n[streaming]\ninter_dc_stream_throughput_mbits = 0"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.streaming.inter_dc_throughput(false), None);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_or_default() {
        let config = load_config_or_default("nonexistent.toml");
        assert_eq!(config.logging.level, "info");
    }
}

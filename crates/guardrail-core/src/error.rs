//! Error types shared by the guardrail crates
//!
//! Everything that can go wrong outside of a guardrail decision itself:
//! reading node configuration and parsing it.

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for node-level plumbing
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration parsing errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CoreError::config("missing section");
        assert!(matches!(err, CoreError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: missing section");
    }

    #[test]
    fn test_error_from_config_parse() {
        let err = CoreError::from(config::ConfigError::NotFound("guardrails".into()));
        assert!(matches!(err, CoreError::ConfigParse(_)));
        assert!(err.to_string().starts_with("Config parse error: "));
        assert!(err.to_string().contains("guardrails"));
    }
}

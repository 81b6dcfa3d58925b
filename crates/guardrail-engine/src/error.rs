//! Error types for guardrails

use guardrail_core::CoreError;

/// Result type for guardrail operations
pub type Result<T> = std::result::Result<T, GuardrailError>;

/// Errors that can occur in guardrail operations
#[derive(Debug, thiserror::Error)]
pub enum GuardrailError {
    /// A guardrail rejected the operation.
    ///
    /// Displays as the bare message so it can be handed to the client as is.
    #[error("{message}")]
    Aborted { guardrail: String, message: String },

    /// Error from guardrail-core
    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl GuardrailError {
    /// Create an abort raised by `guardrail`
    pub fn aborted<S: Into<String>, M: Into<String>>(guardrail: S, message: M) -> Self {
        Self::Aborted {
            guardrail: guardrail.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a guardrail rejection
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

impl From<config::ConfigError> for GuardrailError {
    fn from(err: config::ConfigError) -> Self {
        Self::CoreError(CoreError::from(err))
    }
}

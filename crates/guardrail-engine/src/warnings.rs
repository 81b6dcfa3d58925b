//! Per-request collection of guardrail outcomes

use crate::{guardrail::Guardrail, Outcome, Result};

/// Warnings to return to the client alongside a response.
///
/// Feed every outcome of a request through [`record`](Self::record): warnings
/// accumulate in order, aborts come back as errors for the caller to
/// propagate.
#[derive(Debug, Clone, Default)]
pub struct ClientWarnings {
    warnings: Vec<String>,
}

impl ClientWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of `guardrail`
    ///
    /// # Returns
    /// `Err(GuardrailError::Aborted)` if the outcome was an abort
    pub fn record(&mut self, guardrail: &dyn Guardrail, outcome: Outcome) -> Result<()> {
        match outcome.into_result(guardrail.name()) {
            Ok(Some(message)) => {
                tracing::warn!("Guardrail {} warned: {}", guardrail.name(), message);
                self.warnings.push(message);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                tracing::warn!("Guardrail {} aborted operation: {}", guardrail.name(), e);
                Err(e)
            }
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

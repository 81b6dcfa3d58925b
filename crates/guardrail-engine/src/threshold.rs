//! Numeric guardrail with independent warn and abort levels

use std::sync::Arc;

use crate::{
    guardrail::{Guardrail, Supplier},
    ClientContext, Outcome, ThresholdConfig,
};

/// Builds the message for a triggered threshold.
///
/// Arguments are `(is_warn, what, value, limit)`.
pub type MessageFormatter = Arc<dyn Fn(bool, &str, i64, i64) -> String + Send + Sync>;

/// Threshold guardrail
///
/// A value strictly above the abort level aborts; otherwise a value strictly
/// above the warn level warns. Either level may be disabled.
pub struct Threshold {
    name: String,
    config: Supplier<ThresholdConfig>,
    formatter: MessageFormatter,
}

impl Threshold {
    /// Create a threshold guardrail
    ///
    /// # Arguments
    /// * `name` - Guardrail name, used in logs and errors
    /// * `config` - Accessor for the current warn/abort levels
    /// * `formatter` - Builds the user-facing message
    pub fn new<N, C, M>(name: N, config: C, formatter: M) -> Self
    where
        N: Into<String>,
        C: Fn() -> ThresholdConfig + Send + Sync + 'static,
        M: Fn(bool, &str, i64, i64) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            config: Arc::new(config),
            formatter: Arc::new(formatter),
        }
    }

    /// Check `value` for the quantity labelled `what`
    pub fn guard(&self, value: i64, what: &str, context: ClientContext) -> Outcome {
        if context.is_exempt() {
            return Outcome::Valid;
        }

        let config = (self.config)();

        if let Some(limit) = config.abort_limit() {
            if value > limit {
                tracing::trace!(guardrail = %self.name, value, limit, "abort threshold exceeded");
                return Outcome::Aborted((self.formatter)(false, what, value, limit));
            }
        }

        if let Some(limit) = config.warn_limit() {
            if value > limit {
                tracing::trace!(guardrail = %self.name, value, limit, "warn threshold exceeded");
                return Outcome::Warned((self.formatter)(true, what, value, limit));
            }
        }

        Outcome::Valid
    }
}

impl Guardrail for Threshold {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, context: ClientContext) -> bool {
        !context.is_exempt() && (self.config)().is_enabled()
    }
}

//! Kill-switch guardrail for a named capability

use std::sync::Arc;

use crate::{
    guardrail::{Guardrail, Supplier},
    ClientContext, Outcome,
};

/// Disable-flag guardrail
///
/// Aborts any non-exempt use of a capability while the flag reports it as
/// disabled. There is no warn level.
pub struct DisableFlag {
    name: String,
    what: String,
    disabled: Supplier<bool>,
}

impl DisableFlag {
    /// Create a disable flag
    ///
    /// # Arguments
    /// * `name` - Guardrail name, used in logs and errors
    /// * `disabled` - Accessor returning true while the capability is off
    /// * `what` - Default description of the capability used in messages
    pub fn new<N, D, W>(name: N, disabled: D, what: W) -> Self
    where
        N: Into<String>,
        D: Fn() -> bool + Send + Sync + 'static,
        W: Into<String>,
    {
        Self {
            name: name.into(),
            what: what.into(),
            disabled: Arc::new(disabled),
        }
    }

    /// Description used by [`ensure_enabled`](Self::ensure_enabled)
    pub fn what(&self) -> &str {
        &self.what
    }

    /// Abort if the capability is disabled
    pub fn ensure_enabled(&self, context: ClientContext) -> Outcome {
        self.ensure_enabled_for(&self.what, context)
    }

    /// Same as [`ensure_enabled`](Self::ensure_enabled), describing the
    /// capability as `what` in the message
    pub fn ensure_enabled_for(&self, what: &str, context: ClientContext) -> Outcome {
        if context.is_exempt() {
            return Outcome::Valid;
        }

        if (self.disabled)() {
            tracing::trace!(guardrail = %self.name, "capability disabled");
            return Outcome::Aborted(format!("{} is not allowed", what));
        }

        Outcome::Valid
    }
}

impl Guardrail for DisableFlag {
    fn name(&self) -> &str {
        &self.name
    }

    // Independent of the flag itself.
    fn enabled(&self, context: ClientContext) -> bool {
        !context.is_exempt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_disabled_capability_aborts() {
        let flag = DisableFlag::new("x", || true, "X");
        assert_eq!(
            flag.ensure_enabled(ClientContext::User),
            Outcome::Aborted("X is not allowed".into())
        );
        assert_eq!(
            flag.ensure_enabled_for("Y", ClientContext::User),
            Outcome::Aborted("Y is not allowed".into())
        );
    }

    #[test]
    fn test_enabled_capability_is_valid() {
        let flag = DisableFlag::new("x", || false, "X");
        assert!(flag.ensure_enabled(ClientContext::Anonymous).is_valid());
        assert!(flag.ensure_enabled_for("Y", ClientContext::User).is_valid());
    }

    #[test]
    fn test_enabled_ignores_flag_value() {
        let off = DisableFlag::new("x", || true, "X");
        let on = DisableFlag::new("x", || false, "X");
        for flag in [&off, &on] {
            assert!(flag.enabled(ClientContext::User));
            assert!(flag.enabled(ClientContext::Anonymous));
            assert!(!flag.enabled(ClientContext::System));
            assert!(!flag.enabled(ClientContext::Superuser));
        }
    }

    #[test]
    fn test_flag_change_applies_to_next_call() {
        let disabled = Arc::new(AtomicBool::new(false));
        let reader = Arc::clone(&disabled);
        let flag = DisableFlag::new("x", move || reader.load(Ordering::SeqCst), "X");

        assert!(flag.ensure_enabled(ClientContext::User).is_valid());
        disabled.store(true, Ordering::SeqCst);
        assert!(flag.ensure_enabled(ClientContext::User).is_aborted());
        assert!(flag.ensure_enabled(ClientContext::Superuser).is_valid());
    }
}

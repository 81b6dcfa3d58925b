//! Guardrail over a set of discrete values

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::{
    guardrail::{Guardrail, Supplier},
    ordered_set::render_list,
    ClientContext, Outcome, ValuesConfig,
};

/// Values guardrail
///
/// Provided values that are disallowed abort the operation. Otherwise
/// provided values that are ignored are handed back to the caller for
/// removal and reported as a warning.
///
/// Messages list values in configured order, never in the order the
/// caller's set happens to iterate.
pub struct Values<T> {
    name: String,
    what: String,
    config: Supplier<ValuesConfig<T>>,
}

impl<T> Values<T>
where
    T: Eq + Hash + Clone + Display,
{
    /// Create a values guardrail
    ///
    /// # Arguments
    /// * `name` - Guardrail name, used in logs and errors
    /// * `config` - Accessor for the current ignored/disallowed sets
    /// * `what` - Kind of value guarded, used in messages
    pub fn new<N, C, W>(name: N, config: C, what: W) -> Self
    where
        N: Into<String>,
        C: Fn() -> ValuesConfig<T> + Send + Sync + 'static,
        W: Into<String>,
    {
        Self {
            name: name.into(),
            what: what.into(),
            config: Arc::new(config),
        }
    }

    pub fn what(&self) -> &str {
        &self.what
    }

    /// Check `provided`, calling `ignore` for each ignored value present.
    ///
    /// `ignore` is never called when the outcome is an abort or the caller
    /// is exempt.
    pub fn guard<S, F>(
        &self,
        provided: &HashSet<T, S>,
        mut ignore: F,
        context: ClientContext,
    ) -> Outcome
    where
        S: BuildHasher,
        F: FnMut(&T),
    {
        if context.is_exempt() {
            return Outcome::Valid;
        }

        let config = (self.config)();

        let disallowed = config.disallowed.present_in(provided);
        if !disallowed.is_empty() {
            tracing::trace!(guardrail = %self.name, count = disallowed.len(), "disallowed values provided");
            return Outcome::Aborted(format!(
                "Provided values {} are not allowed for {} (disallowed values are: {})",
                render_list(disallowed),
                self.what,
                config.disallowed
            ));
        }

        let ignored = config.ignored.present_in(provided);
        if !ignored.is_empty() {
            tracing::trace!(guardrail = %self.name, count = ignored.len(), "ignored values provided");
            for value in &ignored {
                ignore(value);
            }
            return Outcome::Warned(format!(
                "Ignoring provided values {} as they are not supported for {} (ignored values are: {})",
                render_list(ignored),
                self.what,
                config.ignored
            ));
        }

        Outcome::Valid
    }
}

impl<T> Guardrail for Values<T>
where
    T: Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self, context: ClientContext) -> bool {
        if context.is_exempt() {
            return false;
        }
        let config = (self.config)();
        !config.ignored.is_empty() || !config.disallowed.is_empty()
    }
}

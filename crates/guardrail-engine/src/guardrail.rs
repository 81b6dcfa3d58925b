//! Guardrail trait definition

use std::sync::Arc;

use crate::ClientContext;

/// Lazy accessor for the current configuration of one guardrail.
///
/// Called once per evaluation; the returned value is never cached.
pub type Supplier<C> = Arc<dyn Fn() -> C + Send + Sync>;

/// Behaviour shared by every guardrail kind
///
/// Each kind additionally exposes its own evaluation method, since the
/// checked input differs (a number, a capability, a set of values).
pub trait Guardrail: Send + Sync {
    /// Get the name of this guardrail
    fn name(&self) -> &str;

    /// Whether a check would currently mean anything for this caller.
    ///
    /// Always false for exempt callers.
    fn enabled(&self, context: ClientContext) -> bool;
}

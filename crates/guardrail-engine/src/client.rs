//! Caller identity as seen by the guardrails

/// Role of the client issuing a guarded operation.
///
/// Only the role matters: `System` and `Superuser` bypass every guardrail,
/// everyone else is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClientContext {
    /// No identity was propagated to the call site
    #[default]
    Anonymous,
    /// Authenticated, non-privileged client
    User,
    /// The server acting on its own behalf
    System,
    /// Operator with elevated privileges
    Superuser,
}

impl ClientContext {
    /// Whether guardrails are skipped entirely for this caller
    pub fn is_exempt(self) -> bool {
        matches!(self, Self::System | Self::Superuser)
    }
}

impl From<Option<ClientContext>> for ClientContext {
    fn from(context: Option<ClientContext>) -> Self {
        context.unwrap_or_default()
    }
}

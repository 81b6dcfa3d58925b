//! Result of a single guardrail evaluation

use crate::{GuardrailError, Result};

/// What a guardrail decided about an operation
#[must_use = "an aborted outcome must stop the guarded operation"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Within limits, nothing to report
    Valid,
    /// Allowed, but the message must be surfaced to the client
    Warned(String),
    /// Rejected; the operation must not run
    Aborted(String),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_warned(&self) -> bool {
        matches!(self, Self::Warned(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    /// Message carried by a warn or abort
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Warned(message) | Self::Aborted(message) => Some(message),
        }
    }

    /// Turn an abort into an error raised on behalf of `guardrail`.
    ///
    /// Returns the warning message, if any, for the caller to forward.
    pub fn into_result(self, guardrail: &str) -> Result<Option<String>> {
        match self {
            Self::Valid => Ok(None),
            Self::Warned(message) => Ok(Some(message)),
            Self::Aborted(message) => Err(GuardrailError::aborted(guardrail, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(Outcome::Valid.is_valid());
        assert!(Outcome::Warned("w".into()).is_warned());
        assert!(Outcome::Aborted("a".into()).is_aborted());
        assert_eq!(Outcome::Valid.message(), None);
        assert_eq!(Outcome::Aborted("a".into()).message(), Some("a"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Outcome::Valid.into_result("g").unwrap(), None);
        assert_eq!(
            Outcome::Warned("careful".into()).into_result("g").unwrap(),
            Some("careful".to_string())
        );

        let err = Outcome::Aborted("no".into()).into_result("g").unwrap_err();
        match err {
            GuardrailError::Aborted { guardrail, message } => {
                assert_eq!(guardrail, "g");
                assert_eq!(message, "no");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An operation was attempted in a phase that does not allow it.
    ///
    /// This is a caller error: the session is left untouched.
    #[error("Cannot {operation} while the trial is {phase}")]
    StateViolation {
        operation: &'static str,
        phase: &'static str,
    },

    /// A turn result failed structural validation.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Participant reply is empty")]
    EmptyReply,
}

impl DomainError {
    pub fn state_violation(operation: &'static str, phase: &'static str) -> Self {
        DomainError::StateViolation { operation, phase }
    }

    /// Check if this error is a rejected call rather than a bad result
    pub fn is_state_violation(&self) -> bool {
        matches!(self, DomainError::StateViolation { .. })
    }
}

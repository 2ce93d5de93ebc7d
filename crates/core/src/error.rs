//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Rejected domain input: admin forms, transfer requests, ids typed by hand.
///
/// Cart mutations have their own error type; failures of the hosted backend are
/// reported by the collaborator that talks to it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The input is well formed but breaks a rule (e.g. transfer to the same warehouse).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A string did not parse as an identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

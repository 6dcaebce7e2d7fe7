//! Session error types

use thiserror::Error;
use veraset_domain::DomainError;

/// Errors raised by a calculation session
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("A calculation is already in progress")]
    SubmissionInFlight,

    #[error("No estate value has been entered")]
    MissingEstateValue,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SessionError {
    /// Whether the same action may succeed once the current state changes
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::SubmissionInFlight => true,
            SessionError::MissingEstateValue => false,
            SessionError::Domain(err) => err.is_retryable(),
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, MessagingError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Precondition violation; fatal to the current operation, never retried
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// The token store could not complete a read or write
    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// True for failures that surface to callers as a 401-equivalent
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DomainError::Auth(_) | DomainError::Token(_))
    }

    /// True for infrastructure failures a caller may retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Messaging(_) | DomainError::Storage { .. }
        )
    }
}

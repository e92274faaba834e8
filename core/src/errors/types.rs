//! Error type definitions for authentication, token, and messaging failures
//!
//! Each concern gets its own enum; `DomainError` in the parent module
//! bridges them for callers that handle everything uniformly.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credential check rejected by the authority
    ///
    /// The message is the authority's own wording and never reveals whether
    /// the username or the password was at fault.
    #[error("{message}")]
    InvalidCredentials { message: String },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// The token is past its expiry, even if structurally valid
    #[error("Token expired")]
    TokenExpired,

    /// Any structural or signature failure, wrapping the underlying cause
    #[error("Invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Signing the claims failed
    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Messaging fabric errors
///
/// Always distinguishable from business failures: a timeout or broker
/// outage must never read as "invalid credentials".
#[derive(Error, Debug)]
pub enum MessagingError {
    /// The remote consumer did not respond within the bound
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The broker rejected or dropped the exchange
    #[error("Message broker unavailable: {message}")]
    BrokerUnavailable { message: String },

    /// A payload failed to encode or decode
    #[error("Message serialization failed: {message}")]
    Serialization { message: String },
}

//! Password hashing and verification helpers

use bcrypt::DEFAULT_COST;

use crate::errors::{DomainError, DomainResult};

/// Hashes a password for storage
pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Verifies a password against a stored bcrypt hash
///
/// bcrypt is deliberately slow and compares in constant time, so a
/// verification takes roughly as long for a wrong password as for a
/// right one.
pub fn verify_password(password: &str, stored_hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, stored_hash).map_err(|e| DomainError::Internal {
        message: format!("Password verification failed: {}", e),
    })
}

//! Refresh token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository contract for the refresh token store
///
/// The store owns row-level atomicity and the uniqueness of the opaque
/// `token` column; callers only ever issue single-row operations.
///
/// # Security Considerations
/// - Revocation is a soft delete: rows stay behind so storage can tell
///   "never existed" from "existed, then revoked"
/// - Deletion is administrative cleanup, never part of validation or
///   revocation
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored token
    /// * `Err(DomainError)` - Write failed, including the unique `token`
    ///   column rejecting a colliding value (a storage integrity violation,
    ///   not a normal outcome)
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its opaque value
    ///
    /// Returns the row regardless of its revocation or expiry state; the
    /// caller derives validity.
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Mark a token revoked
    ///
    /// # Returns
    /// * `Ok(true)` - The row transitioned to revoked
    /// * `Ok(false)` - No row matched, or it was already revoked
    async fn revoke(&self, token: &str) -> Result<bool, DomainError>;

    /// All tokens ever issued to a user, newest first
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<RefreshToken>, DomainError>;

    /// Administrative removal of a token row
    ///
    /// # Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No row with that id
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

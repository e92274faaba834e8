//! User repository trait for the credential authority's user store.

use async_trait::async_trait;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Repository contract for user records, role and group membership
///
/// Only the credential authority reads through this trait; the token
/// service holds no user state and treats every login as a fresh lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Locate a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Role names granted to the user
    async fn find_role_names(&self, user_id: i64) -> Result<Vec<String>, DomainError>;

    /// Group names the user belongs to
    async fn find_group_names(&self, user_id: i64) -> Result<Vec<String>, DomainError>;
}

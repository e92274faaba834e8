//! User account entity owned by the credential authority.

use serde::{Deserialize, Serialize};

/// User record as stored by the identity authority
///
/// The token service never holds these; only the credential service reads
/// them through a `UserRepository`. Role and group membership is resolved
/// separately at authentication time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// User identifier
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Email address
    pub email: String,

    /// Bcrypt hash of the user's password
    pub password_hash: String,
}

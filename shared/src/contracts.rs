//! Wire contracts exchanged between the token service and the credential
//! authority
//!
//! These records are jointly owned: the token service sends `AuthRequest`
//! over the messaging fabric and the credential authority answers with
//! `AuthResponse`. Neither side persists the request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential check request carried over the messaging fabric
///
/// Holds the cleartext credential as presented by the client; the token
/// service only forwards it and never stores it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Username to authenticate
    pub username: String,

    /// Cleartext password to verify against the stored hash
    pub password: String,
}

// Keep the password out of debug output and logs.
impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credential check response from the authority
///
/// `user` is present iff `success`; `error` carries the authority's reason
/// when the check fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the credentials were accepted
    pub success: bool,

    /// Failure reason reported by the authority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Profile of the authenticated user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

impl AuthResponse {
    /// Response for an accepted credential check
    pub fn granted(user: UserDto) -> Self {
        Self {
            success: true,
            error: None,
            user: Some(user),
        }
    }

    /// Response for a rejected or failed credential check
    pub fn denied(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            user: None,
        }
    }
}

/// User profile as reported by the credential authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// User identifier
    pub id: i64,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Role names granted to the user
    #[serde(default)]
    pub roles: Vec<String>,

    /// Group names the user belongs to
    #[serde(default)]
    pub groups: Vec<String>,
}

//! Login response value object carrying the issued tokens.

use serde::{Deserialize, Serialize};

use gk_shared::contracts::UserDto;

/// Result of a successful login
///
/// Carries the freshly minted token pair along with the profile the
/// credential authority returned for the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Profile of the authenticated user
    pub user: UserDto,
}

impl TokenResponse {
    /// Creates a new token response
    pub fn new(access_token: String, refresh_token: String, user: UserDto) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }
}

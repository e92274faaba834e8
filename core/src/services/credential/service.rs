//! Credential verification service answering authentication requests

use std::sync::Arc;

use async_trait::async_trait;

use gk_shared::contracts::{AuthRequest, AuthResponse, UserDto};

use crate::errors::{AuthError, DomainError, DomainResult};
use crate::messaging::Consumer;
use crate::repositories::UserRepository;

use super::password;

/// Message returned for an unknown username and for a wrong password alike,
/// so callers cannot probe which usernames exist
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// The credential authority's request handler
///
/// Looks users up by username, verifies the presented password against the
/// stored bcrypt hash, and assembles the role and group claims for the
/// response.
pub struct CredentialService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> CredentialService<U> {
    /// Creates a new credential service over a user store
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Verifies a username/password pair and assembles the user's profile
    ///
    /// # Returns
    ///
    /// * `Ok(UserDto)` - Credentials accepted; profile with roles and groups
    /// * `Err(DomainError::Auth)` - Unknown username or password mismatch,
    ///   indistinguishably
    /// * `Err(DomainError)` - The user store failed
    pub async fn authenticate(&self, request: &AuthRequest) -> DomainResult<UserDto> {
        let user = match self.users.find_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %request.username, "Unknown username in authentication request");
                return Err(DomainError::Auth(AuthError::InvalidCredentials {
                    message: INVALID_CREDENTIALS_MESSAGE.to_string(),
                }));
            }
        };

        if !password::verify_password(&request.password, &user.password_hash)? {
            tracing::warn!(username = %request.username, "Password mismatch");
            return Err(DomainError::Auth(AuthError::InvalidCredentials {
                message: INVALID_CREDENTIALS_MESSAGE.to_string(),
            }));
        }

        let roles = self.users.find_role_names(user.id).await?;
        let groups = self.users.find_group_names(user.id).await?;

        tracing::info!(username = %user.username, user_id = user.id, "Authentication successful");

        Ok(UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            roles,
            groups,
        })
    }
}

#[async_trait]
impl<U: UserRepository> Consumer<AuthRequest, AuthResponse> for CredentialService<U> {
    /// Always responds: credential rejections and internal failures both
    /// travel back as a denied response rather than a dropped exchange.
    async fn consume(&self, request: AuthRequest) -> AuthResponse {
        tracing::info!(username = %request.username, "Received authentication request");

        match self.authenticate(&request).await {
            Ok(user) => AuthResponse::granted(user),
            Err(DomainError::Auth(AuthError::InvalidCredentials { message })) => {
                AuthResponse::denied(message)
            }
            Err(e) => {
                tracing::error!(
                    username = %request.username,
                    error = %e,
                    "Error while processing authentication request"
                );
                AuthResponse::denied(e.to_string())
            }
        }
    }
}

//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use gk_shared::contracts::{AuthRequest, AuthResponse, UserDto};

use crate::domain::entities::token::{Claims, RefreshToken};
use crate::domain::value_objects::TokenResponse;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::messaging::RequestClient;
use crate::repositories::RefreshTokenRepository;

use super::config::TokenServiceConfig;

/// Fallback reason when the authority rejects a login without one
const LOGIN_REJECTED_MESSAGE: &str = "Invalid username or password";

/// Service for managing JWT access tokens and persisted refresh tokens
///
/// Orchestrates the login protocol: credentials go to the remote credential
/// authority over the messaging fabric, and only a successful correlated
/// response mints tokens. The service keeps no user state and no token
/// cache; the refresh token store is its only side-effect target.
pub struct TokenService<R, C>
where
    R: RefreshTokenRepository,
    C: RequestClient<AuthRequest, AuthResponse>,
{
    pub(crate) repository: R,
    credential_client: C,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R, C> TokenService<R, C>
where
    R: RefreshTokenRepository,
    C: RequestClient<AuthRequest, AuthResponse>,
{
    /// Creates a new token service instance
    ///
    /// The signing keys and validation rules are derived from the shared
    /// secret once here; they are immutable afterwards and safe to use from
    /// concurrent logins without synchronization.
    pub fn new(repository: R, credential_client: C, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        // Zero clock-skew tolerance on expiry
        validation.leeway = 0;

        Self {
            repository,
            credential_client,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Runs the login protocol for a username/password pair
    ///
    /// Sends an `AuthRequest` to the credential authority over the fabric
    /// and awaits the correlated `AuthResponse`. Tokens are minted and the
    /// refresh token persisted strictly after a successful response; no
    /// failure path leaves a row behind.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenResponse)` - Access token, refresh token, and user profile
    /// * `Err(DomainError::Auth)` - The authority rejected the credentials
    /// * `Err(DomainError::Messaging)` - The fabric failed or timed out;
    ///   retryable and never reported as a credential failure
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, DomainError> {
        tracing::info!(username, "Processing login request");

        let request = AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse =
            self.credential_client.request(request).await.map_err(|e| {
                tracing::error!(username, error = %e, "Credential authority exchange failed");
                DomainError::Messaging(e)
            })?;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| LOGIN_REJECTED_MESSAGE.to_string());
            tracing::warn!(username, reason = %message, "Login rejected by credential authority");
            return Err(DomainError::Auth(AuthError::InvalidCredentials { message }));
        }

        let user = response.user.ok_or_else(|| {
            tracing::error!(username, "Authority reported success without a user profile");
            DomainError::InvalidState {
                message: "authentication succeeded without a user profile".to_string(),
            }
        })?;

        let access_token = self.generate_access_token(&user)?;
        let refresh_token = self.generate_refresh_token(user.id).await?;

        tracing::info!(username = %user.username, user_id = user.id, "Login succeeded");
        Ok(TokenResponse::new(access_token, refresh_token, user))
    }

    /// Generates a signed access token for a user profile
    ///
    /// Pure function of the profile, the clock, and the shared secret.
    /// Embeds exactly: subject id, username, email, one claim per role, one
    /// per group, configured issuer/audience, and the configured expiry.
    pub fn generate_access_token(&self, user: &UserDto) -> Result<String, DomainError> {
        tracing::info!(user_id = user.id, "Generating access token");

        if !user.roles.is_empty() {
            tracing::debug!(user_id = user.id, roles = ?user.roles, "Embedding role claims");
        }
        if !user.groups.is_empty() {
            tracing::debug!(user_id = user.id, groups = ?user.groups, "Embedding group claims");
        }

        let claims = Claims::new_access_token(
            user,
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry_minutes,
        );

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Creates and persists a new refresh token for a user
    ///
    /// The opaque value is freshly random on every call; a collision is
    /// rejected by the store's unique column and surfaces as a storage
    /// failure, not a normal outcome.
    pub async fn generate_refresh_token(&self, user_id: i64) -> Result<String, DomainError> {
        let refresh_token =
            RefreshToken::with_expiry_days(user_id, self.config.refresh_token_expiry_days);

        // Token values stay out of the logs; the entity id is enough to trace
        let stored = self.repository.create(refresh_token).await.map_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to persist refresh token");
            e
        })?;

        tracing::info!(user_id, token_id = %stored.id, "Refresh token generated");
        Ok(stored.token)
    }

    /// Checks whether a refresh token is usable
    ///
    /// Read-only: true iff the token exists, is not revoked, and is not past
    /// expiry. An unknown or garbled value is `false`, not an error; only a
    /// store failure is.
    pub async fn validate_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        let is_valid = self
            .repository
            .find_by_token(token)
            .await?
            .map(|t| t.is_valid())
            .unwrap_or(false);

        if !is_valid {
            tracing::warn!("Refresh token validation failed");
        }

        Ok(is_valid)
    }

    /// Revokes a refresh token
    ///
    /// Idempotent: revoking an already-revoked or unknown token completes
    /// without error. An unknown token is only visible in the logs.
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<(), DomainError> {
        match self.repository.find_by_token(token).await? {
            Some(existing) if existing.is_revoked => {
                tracing::debug!(token_id = %existing.id, "Refresh token already revoked");
            }
            Some(existing) => {
                self.repository.revoke(token).await?;
                tracing::info!(
                    token_id = %existing.id,
                    user_id = existing.user_id,
                    "Refresh token revoked"
                );
            }
            None => {
                tracing::warn!("No refresh token found for revocation");
            }
        }

        Ok(())
    }

    /// Verifies an access token and returns its claims
    ///
    /// Checks signature, issuer, audience, and expiry with zero leeway.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(TokenError::TokenExpired)` - Past expiry, even if structurally
    ///   valid
    /// * `Err(TokenError::InvalidToken)` - Any other failure, wrapping the
    ///   underlying cause
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    tracing::warn!("Access token is expired");
                    DomainError::Token(TokenError::TokenExpired)
                } else {
                    tracing::warn!(error = %e, "Access token validation failed");
                    DomainError::Token(TokenError::InvalidToken(e))
                }
            })?;

        Ok(token_data.claims)
    }

    /// All refresh tokens ever issued to a user (administrative)
    pub async fn find_user_tokens(&self, user_id: i64) -> Result<Vec<RefreshToken>, DomainError> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Deletes a refresh token row outright (administrative cleanup,
    /// separate from the validate/revoke path)
    pub async fn delete_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repository.delete(id).await?;

        if deleted {
            tracing::info!(token_id = %id, "Refresh token deleted");
        } else {
            tracing::warn!(token_id = %id, "No refresh token found for deletion");
        }

        Ok(deleted)
    }
}

//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gk_shared::contracts::UserDto;

/// Access token expiration time (30 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Refresh token expiration time (30 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Length of the opaque refresh token value (alphanumeric, ~190 bits)
const REFRESH_TOKEN_LENGTH: usize = 32;

/// Claims structure for the JWT payload
///
/// Carries the subject's identity plus one entry per role and group, so any
/// holder of the shared secret can authorize offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username the token was issued to
    pub username: String,

    /// Email address of the subject
    pub email: String,

    /// Role names granted to the subject
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Group names the subject belongs to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user` - Profile returned by the credential authority
    /// * `issuer` - Configured issuer claim
    /// * `audience` - Configured audience claim
    /// * `expiry_minutes` - Access token lifetime
    pub fn new_access_token(
        user: &UserDto,
        issuer: &str,
        audience: &str,
        expiry_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(expiry_minutes);

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            groups: user.groups.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(i64)` if the subject parses as a user id, `Err` otherwise
    pub fn user_id(&self) -> Result<i64, std::num::ParseIntError> {
        self.sub.parse()
    }

    /// Whether the subject holds the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Refresh token entity stored in the database
///
/// The opaque `token` value is the lookup key clients present; `is_revoked`
/// is a soft-delete flag and the only field ever mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// Opaque token value presented by clients
    pub token: String,

    /// User ID this token belongs to
    pub user_id: i64,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token with the default expiry
    pub fn new(user_id: i64) -> Self {
        Self::with_expiry_days(user_id, REFRESH_TOKEN_EXPIRY_DAYS)
    }

    /// Creates a new refresh token expiring after `expiry_days`
    pub fn with_expiry_days(user_id: i64, expiry_days: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            token: generate_token_value(),
            user_id,
            created_at: now,
            expires_at: now + Duration::days(expiry_days),
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token is valid
    ///
    /// A token is valid if it hasn't expired and hasn't been revoked.
    /// Both states are derived here at check time; only revocation is stored.
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the refresh token (monotonic; there is no un-revoke)
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Generates a cryptographically random alphanumeric token value
fn generate_token_value() -> String {
    let mut rng = rand::thread_rng();
    (0..REFRESH_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..10 => (b'0' + idx) as char,
                10..36 => (b'a' + idx - 10) as char,
                36..62 => (b'A' + idx - 36) as char,
                _ => unreachable!(),
            }
        })
        .collect()
}

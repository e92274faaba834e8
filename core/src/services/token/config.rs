//! Configuration for the token service

use gk_shared::config::JwtConfig;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
///
/// Built once at startup and injected into the service; nothing here is
/// mutated afterwards, so concurrent logins share it freely.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret shared with every service that validates tokens
    pub jwt_secret: String,
    /// Issuer claim stamped into and required of every access token
    pub issuer: String,
    /// Audience claim stamped into and required of every access token
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: "gatekeeper".to_string(),
            audience: "gatekeeper-api".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret,
            issuer: config.issuer,
            audience: config.audience,
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        }
    }
}

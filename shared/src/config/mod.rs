//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing configuration
//! - `database` - Database connection and pool configuration
//! - `messaging` - Request/response fabric configuration

pub mod auth;
pub mod database;
pub mod messaging;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use messaging::MessagingConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Messaging fabric configuration
    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            database: DatabaseConfig::default(),
            messaging: MessagingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            database: DatabaseConfig::from_env(),
            messaging: MessagingConfig::from_env(),
        }
    }
}

//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the gatekeeper
//! backend. It provides concrete implementations for the interfaces the
//! core crate defines:
//!
//! - **Database**: MySQL repositories using SQLx (refresh token store,
//!   the credential authority's user store)
//! - **Messaging**: the in-process request/response bus implementing the
//!   fabric contract

pub mod database;
pub mod messaging;

use gk_shared::config::AppConfig;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Load application configuration from the environment
///
/// Reads a `.env` file when present, then falls back to process
/// environment variables and the built-in defaults.
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

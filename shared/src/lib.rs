//! Shared configuration and wire contracts for the gatekeeper services
//!
//! This crate provides the pieces every service in the workspace agrees on:
//! - Configuration types (JWT signing, database, messaging fabric)
//! - Wire contracts exchanged between the token service and the credential
//!   authority

pub mod config;
pub mod contracts;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, JwtConfig, MessagingConfig};
pub use contracts::{AuthRequest, AuthResponse, UserDto};

//! # Gatekeeper Core
//!
//! Core business logic and domain layer for the gatekeeper backend.
//! This crate contains domain entities, business services, repository
//! interfaces, messaging contracts, and error types that form the
//! foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod messaging;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use messaging::{Consumer, RequestClient};
pub use repositories::{RefreshTokenRepository, UserRepository};
pub use services::{CredentialService, TokenService, TokenServiceConfig};

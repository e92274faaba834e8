//! Credential authority service
//!
//! The remote identity authority: sole owner of user records, password
//! hashes, and role/group membership. It answers `AuthRequest` exchanges
//! arriving over the messaging fabric and never errors an exchange; every
//! request gets a response.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{hash_password, verify_password};
pub use service::CredentialService;

//! Business entities for the credential and token lifecycle.

pub mod token;
pub mod user;

pub use token::{Claims, RefreshToken};
pub use user::UserAccount;

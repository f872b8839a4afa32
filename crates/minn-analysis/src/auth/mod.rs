//! Credential check simulation - users table lookup and role codes
//!
//! This is a plaintext equality lookup used only to pick which message the
//! report prints. It is not authentication.

pub mod checker;
pub mod types;

pub use checker::{simulate_login, UserDirectory};
pub use types::{LoginOutcome, RoleId, UserCredential};

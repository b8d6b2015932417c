//! Ports for password hashing and session token generation.
//!
//! Both are synchronous: they do no I/O beyond reading the OS RNG.

use crate::domain::{PasswordDigest, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential adapters.
    pub enum CredentialError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialError>;

    /// Check `password` against `digest`.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialError>;
}

/// Source of fresh random session tokens.
///
/// Implementations make no uniqueness promise; callers check for collisions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokenSource: Send + Sync {
    fn generate(&self) -> SessionToken;
}

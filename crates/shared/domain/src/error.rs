//! Domain-level errors.
//!
//! These errors cover the credential lifecycle. They are independent of
//! infrastructure concerns (database, transport).

use thiserror::Error;

/// Credential hashing and verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The hashing algorithm could not produce a hash
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The supplied password does not match the stored hash
    #[error("Invalid credentials")]
    Mismatch,

    /// The stored hash is empty or not a recognizable hash
    #[error("Malformed credential hash: {0}")]
    MalformedHash(String),
}

impl CredentialError {
    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        CredentialError::Hashing(msg.into())
    }

    /// Create a malformed hash error
    pub fn malformed(msg: impl Into<String>) -> Self {
        CredentialError::MalformedHash(msg.into())
    }
}

/// Result type alias for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;

//! Error types for password-reset domain operations.

use thiserror::Error;

/// Errors returned while constructing reset-token values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordResetDomainError {
    /// The raw token could not be hashed for storage.
    #[error("reset token hashing failed: {0}")]
    TokenHashing(String),
}

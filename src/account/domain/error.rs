//! Error types for account domain validation.

use thiserror::Error;

/// Errors returned while constructing domain account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The phone number does not follow `+<country code><digits>`.
    #[error("invalid phone number '{0}'")]
    InvalidPhoneNumber(String),

    /// The password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHashing(String),
}

//! Error types for OTP domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain OTP values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OtpDomainError {
    /// The code is not exactly four ASCII digits.
    #[error("invalid OTP code '{0}', expected four digits")]
    InvalidCode(String),
}

/// Error returned while parsing OTP statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown OTP status: {0}")]
pub struct ParseOtpStatusError(pub String);

//! Four-digit numeric OTP codes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::OtpDomainError;

/// Number of digits in a generated code.
const CODE_LENGTH: usize = 4;

/// Validated numeric one-time-password code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Creates a validated code (exactly four ASCII digits).
    ///
    /// # Errors
    ///
    /// Returns [`OtpDomainError::InvalidCode`] otherwise.
    pub fn new(value: impl Into<String>) -> Result<Self, OtpDomainError> {
        let value = value.into();
        let valid = value.len() == CODE_LENGTH && value.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(OtpDomainError::InvalidCode(value));
        }
        Ok(Self(value))
    }

    /// Generates a random four-digit code.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let digits: String = (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10)))
            .collect();
        Self(digits)
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

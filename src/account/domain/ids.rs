//! Identifier and validated scalar types for the account domain.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an account record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an account identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for AccountId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized login username, unique among active accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username (trimmed, lowercased, non-empty).
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyUsername`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let normalized = value.into().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AccountDomainError::EmptyUsername);
        }
        Ok(Self(normalized))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured phone number, unique among active accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    country_code: String,
    local_number: String,
}

impl PhoneNumber {
    /// Creates a validated phone number from a `+`-prefixed country
    /// code and a digits-only local number.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidPhoneNumber`] when the
    /// country code is not `+` followed by 1-3 digits or the local
    /// number is not 4-12 digits.
    pub fn from_parts(
        country_code: impl Into<String>,
        local_number: impl Into<String>,
    ) -> Result<Self, AccountDomainError> {
        let country_code = country_code.into().trim().to_owned();
        let local_number = local_number.into().trim().to_owned();

        let code_digits = country_code.strip_prefix('+').unwrap_or_default();
        let code_valid = !code_digits.is_empty()
            && code_digits.len() <= 3
            && code_digits.chars().all(|c| c.is_ascii_digit());
        let local_valid = (4..=12).contains(&local_number.len())
            && local_number.chars().all(|c| c.is_ascii_digit());

        if !code_valid || !local_valid {
            return Err(AccountDomainError::InvalidPhoneNumber(format!(
                "{country_code}{local_number}"
            )));
        }

        Ok(Self {
            country_code,
            local_number,
        })
    }

    /// Returns the `+`-prefixed country code.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Returns the digits-only local number.
    #[must_use]
    pub fn local_number(&self) -> &str {
        &self.local_number
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.country_code, self.local_number)
    }
}

//! Token value types and bearer-header parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccessTokenError;
use crate::account::domain::AccountId;

/// Scheme prefix expected in the authorization header.
const BEARER_PREFIX: &str = "Bearer ";

/// A freshly issued access token with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Signed compact JWT.
    pub token: String,
    /// Account the token grants access to.
    pub account_id: AccountId,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Claims carried inside a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Account the token was issued for.
    pub account_id: AccountId,
    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Checks that the token grants access to the given account.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::UnauthorizedAccess`] on mismatch,
    /// deliberately indistinguishable for the caller from any other
    /// authorization failure.
    pub fn ensure_account(&self, account_id: AccountId) -> Result<(), AccessTokenError> {
        if self.account_id == account_id {
            Ok(())
        } else {
            Err(AccessTokenError::UnauthorizedAccess)
        }
    }
}

/// Raw token extracted from an authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Extracts the token from an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::HeaderNotFound`] when the header is
    /// absent and [`AccessTokenError::MalformedHeader`] when it does
    /// not follow `Bearer <token>`.
    pub fn from_header(header: Option<&str>) -> Result<Self, AccessTokenError> {
        let header = header.ok_or(AccessTokenError::HeaderNotFound)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AccessTokenError::MalformedHeader)?
            .trim();
        if token.is_empty() {
            return Err(AccessTokenError::MalformedHeader);
        }
        Ok(Self(token.to_owned()))
    }

    /// Returns the raw compact JWT.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

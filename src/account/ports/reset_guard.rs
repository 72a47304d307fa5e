//! Port through which the account service proves a password-reset
//! token before accepting a new password.
//!
//! Implemented by the password-reset token service; the indirection
//! keeps the account context free of reset-token storage details.

use crate::account::domain::AccountId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Opaque evidence that a presented reset token verified successfully.
///
/// Passed back to [`ResetTokenGuard::consume`] once the password change
/// has been persisted, so the token is burned only after the change
/// actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedResetToken(Uuid);

impl VerifiedResetToken {
    /// Wraps the identifier of a verified token record.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the wrapped token-record identifier.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

/// Reset-token verification contract.
#[async_trait]
pub trait ResetTokenGuard: Send + Sync {
    /// Verifies the presented raw token against the account's most
    /// recently issued reset token.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ResetTokenGuardError`] kind when no token
    /// exists, the token expired, was already used, or does not match.
    async fn verify(
        &self,
        account_id: AccountId,
        presented: &str,
    ) -> Result<VerifiedResetToken, ResetTokenGuardError>;

    /// Marks a previously verified token as used.
    ///
    /// # Errors
    ///
    /// Returns [`ResetTokenGuardError::NotFound`] when the token record
    /// vanished, or [`ResetTokenGuardError::Upstream`] on persistence
    /// failure.
    async fn consume(&self, token: VerifiedResetToken) -> Result<(), ResetTokenGuardError>;
}

/// Errors surfaced by reset-token verification.
#[derive(Debug, Clone, Error)]
pub enum ResetTokenGuardError {
    /// No reset token has been issued for the account.
    #[error("no password reset token found for account {0}")]
    NotFound(AccountId),

    /// The most recent token is past its expiry.
    #[error("password reset token expired for account {0}")]
    Expired(AccountId),

    /// The most recent token was already used.
    #[error("password reset token already used for account {0}")]
    AlreadyUsed(AccountId),

    /// The presented token does not match the stored hash.
    #[error("password reset token mismatch for account {0}")]
    Mismatch(AccountId),

    /// Verification failed for an infrastructure reason.
    #[error("reset token verification failed: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResetTokenGuardError {
    /// Wraps an upstream failure.
    pub fn upstream(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(err))
    }
}

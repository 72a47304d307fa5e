//! Repository port for reset-token persistence and lookup.

use crate::account::domain::AccountId;
use crate::password_reset::domain::{PasswordResetToken, PasswordResetTokenId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reset-token repository operations.
pub type ResetTokenRepositoryResult<T> = Result<T, ResetTokenRepositoryError>;

/// Reset-token persistence contract.
#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    /// Stores a new token record.
    ///
    /// # Errors
    ///
    /// Returns [`ResetTokenRepositoryError::DuplicateToken`] when the
    /// ID exists.
    async fn insert(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()>;

    /// Persists changes to an existing record (single-use flag).
    ///
    /// # Errors
    ///
    /// Returns [`ResetTokenRepositoryError::NotFound`] when the record
    /// does not exist.
    async fn update(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()>;

    /// Finds a token record by identifier.
    async fn find_by_id(
        &self,
        id: PasswordResetTokenId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>>;

    /// Finds the most recently issued token for an account (expiry
    /// descending).
    async fn find_latest_by_account(
        &self,
        account_id: AccountId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>>;
}

/// Errors returned by reset-token repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ResetTokenRepositoryError {
    /// A token with the same identifier already exists.
    #[error("duplicate reset token identifier: {0}")]
    DuplicateToken(PasswordResetTokenId),

    /// The token record was not found.
    #[error("reset token not found: {0}")]
    NotFound(PasswordResetTokenId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResetTokenRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

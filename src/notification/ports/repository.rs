//! Repository port for notification-preferences persistence.

use crate::account::domain::AccountId;
use crate::notification::domain::NotificationPreferences;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for preferences repository operations.
pub type PreferencesRepositoryResult<T> = Result<T, PreferencesRepositoryError>;

/// Preferences persistence contract; one active row per account.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Stores a new preferences row.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError::DuplicatePreferences`]
    /// when an active row already exists for the account.
    async fn insert(&self, preferences: &NotificationPreferences)
    -> PreferencesRepositoryResult<()>;

    /// Persists changes to an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesRepositoryError::NotFound`] when no active
    /// row exists for the account.
    async fn update(&self, preferences: &NotificationPreferences)
    -> PreferencesRepositoryResult<()>;

    /// Finds the active preferences row for an account.
    async fn find_active_by_account(
        &self,
        account_id: AccountId,
    ) -> PreferencesRepositoryResult<Option<NotificationPreferences>>;
}

/// Errors returned by preferences repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PreferencesRepositoryError {
    /// An active row already exists for the account.
    #[error("duplicate notification preferences for account {0}")]
    DuplicatePreferences(AccountId),

    /// No active row exists for the account.
    #[error("notification preferences not found for account {0}")]
    NotFound(AccountId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PreferencesRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for notification-preferences upsert and lookup.

use crate::account::domain::AccountId;
use crate::error::ErrorCode;
use crate::notification::{
    domain::{NotificationPreferences, PreferencesPatch},
    ports::{PreferencesRepository, PreferencesRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for preferences operations.
#[derive(Debug, Error)]
pub enum PreferencesServiceError {
    /// No active preferences row exists for the account.
    #[error("notification preferences not found for account {0}")]
    NotFound(AccountId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PreferencesRepositoryError),
}

impl ErrorCode for PreferencesServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOTIFICATION_ERR_01",
            Self::Repository(PreferencesRepositoryError::NotFound(_)) => "NOTIFICATION_ERR_01",
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::Repository(PreferencesRepositoryError::NotFound(_)) => 404,
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for preferences service operations.
pub type PreferencesServiceResult<T> = Result<T, PreferencesServiceError>;

/// Preferences upsert and lookup service.
#[derive(Clone)]
pub struct NotificationPreferencesService<P, C>
where
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> NotificationPreferencesService<P, C>
where
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new preferences service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates or partially updates an account's preferences row.
    ///
    /// Absent row: create with defaults merged over the provided patch
    /// fields. Present row: patch only the provided fields, leaving the
    /// rest untouched. The read-then-write pair is two round-trips; the
    /// store's uniqueness constraint backstops concurrent first writes.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesServiceError::Repository`] when persistence
    /// fails.
    pub async fn upsert(
        &self,
        account_id: AccountId,
        patch: &PreferencesPatch,
    ) -> PreferencesServiceResult<NotificationPreferences> {
        match self.repository.find_active_by_account(account_id).await? {
            Some(mut preferences) => {
                preferences.apply_patch(patch, &*self.clock);
                self.repository.update(&preferences).await?;
                Ok(preferences)
            }
            None => {
                let preferences = NotificationPreferences::new(account_id, patch, &*self.clock);
                self.repository.insert(&preferences).await?;
                Ok(preferences)
            }
        }
    }

    /// Returns the active preferences row for an account.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesServiceError::NotFound`] when no active row
    /// exists.
    pub async fn get(
        &self,
        account_id: AccountId,
    ) -> PreferencesServiceResult<NotificationPreferences> {
        self.repository
            .find_active_by_account(account_id)
            .await?
            .ok_or(PreferencesServiceError::NotFound(account_id))
    }
}

//! Repository port for account persistence and active-only lookup.

use crate::account::domain::{Account, AccountId, PhoneNumber, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for account repository operations.
pub type AccountRepositoryResult<T> = Result<T, AccountRepositoryError>;

/// Account persistence contract.
///
/// All `find_active_*` lookups exclude soft-deleted accounts; an
/// inactive account is indistinguishable from an absent one.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::DuplicateUsername`] or
    /// [`AccountRepositoryError::DuplicatePhoneNumber`] when another
    /// active account already holds the identity, and
    /// [`AccountRepositoryError::DuplicateAccount`] when the ID exists.
    async fn insert(&self, account: &Account) -> AccountRepositoryResult<()>;

    /// Persists changes to an existing account (profile, password,
    /// soft-delete flag, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::NotFound`] when the account
    /// does not exist.
    async fn update(&self, account: &Account) -> AccountRepositoryResult<()>;

    /// Finds an active account by identifier.
    async fn find_active_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>>;

    /// Finds an active account by username.
    async fn find_active_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>>;

    /// Finds an active account by phone number.
    async fn find_active_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> AccountRepositoryResult<Option<Account>>;
}

/// Errors returned by account repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AccountRepositoryError {
    /// An account with the same identifier already exists.
    #[error("duplicate account identifier: {0}")]
    DuplicateAccount(AccountId),

    /// An active account already holds this username.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// An active account already holds this phone number.
    #[error("duplicate phone number: {0}")]
    DuplicatePhoneNumber(PhoneNumber),

    /// The account was not found.
    #[error("account not found: {0}")]
    NotFound(AccountId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccountRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

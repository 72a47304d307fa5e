//! Service layer for account registration, authentication, and
//! lifecycle management.

use crate::account::{
    domain::{
        Account, AccountDomainError, AccountId, AccountProfile, HashedPassword, PhoneNumber,
        Username,
    },
    ports::{
        AccountRepository, AccountRepositoryError, ResetTokenGuard, ResetTokenGuardError,
    },
};
use crate::error::ErrorCode;
use crate::notification::domain::PreferencesPatch;
use crate::notification::ports::PreferencesRepository;
use crate::notification::services::{NotificationPreferencesService, PreferencesServiceError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for credential-based account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountRequest {
    first_name: String,
    last_name: String,
    username: String,
    password: String,
}

impl CreateAccountRequest {
    /// Creates a request with all required fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Partial profile update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    first_name: Option<String>,
    last_name: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the given name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the family name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

/// Receipt returned after a successful soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountDeletionReceipt {
    /// The deleted account.
    pub account_id: AccountId,
    /// When the soft delete was stamped.
    pub deleted_at: DateTime<Utc>,
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AccountRepositoryError),
    /// Another active account already holds the username.
    #[error("an account with username {0} already exists")]
    UsernameTaken(Username),
    /// Another active account already holds the phone number.
    #[error("an account with phone number {0} already exists")]
    PhoneNumberTaken(PhoneNumber),
    /// No active account with the given identifier.
    #[error("account not found: {0}")]
    NotFoundById(AccountId),
    /// No active account with the given username.
    #[error("no account found for username {0}")]
    NotFoundByUsername(Username),
    /// No active account with the given phone number.
    #[error("no account found for phone number {0}")]
    NotFoundByPhoneNumber(PhoneNumber),
    /// The supplied password does not match.
    #[error("incorrect password")]
    InvalidPassword,
    /// No reset token has been issued for the account.
    #[error("no password reset token found for account {0}")]
    ResetTokenNotFound(AccountId),
    /// The reset token is past its expiry.
    #[error("password reset link is expired for account {0}")]
    ResetTokenExpired(AccountId),
    /// The reset token was already used.
    #[error("password reset token is already used for account {0}")]
    ResetTokenUsed(AccountId),
    /// The presented reset token does not match.
    #[error("password reset link is invalid for account {0}")]
    ResetTokenMismatch(AccountId),
    /// Default-preference provisioning failed.
    #[error(transparent)]
    Preferences(#[from] PreferencesServiceError),
}

impl From<ResetTokenGuardError> for AccountServiceError {
    fn from(err: ResetTokenGuardError) -> Self {
        match err {
            ResetTokenGuardError::NotFound(account_id) => Self::ResetTokenNotFound(account_id),
            ResetTokenGuardError::Expired(account_id) => Self::ResetTokenExpired(account_id),
            ResetTokenGuardError::AlreadyUsed(account_id) => Self::ResetTokenUsed(account_id),
            ResetTokenGuardError::Mismatch(account_id) => Self::ResetTokenMismatch(account_id),
            ResetTokenGuardError::Upstream(err) => {
                Self::Repository(AccountRepositoryError::Persistence(err))
            }
        }
    }
}

impl ErrorCode for AccountServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::UsernameTaken(_) => "ACCOUNT_ERR_01",
            Self::NotFoundById(_) | Self::NotFoundByUsername(_) | Self::NotFoundByPhoneNumber(_) => {
                "ACCOUNT_ERR_02"
            }
            Self::InvalidPassword => "ACCOUNT_ERR_03",
            Self::Domain(_)
            | Self::ResetTokenExpired(_)
            | Self::ResetTokenUsed(_)
            | Self::ResetTokenMismatch(_) => "ACCOUNT_ERR_04",
            Self::PhoneNumberTaken(_) => "ACCOUNT_ERR_05",
            Self::ResetTokenNotFound(_) => "PASSWORD_RESET_TOKEN_ERR_01",
            Self::Preferences(err) => err.code(),
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::UsernameTaken(_) | Self::PhoneNumberTaken(_) => 409,
            Self::NotFoundById(_)
            | Self::NotFoundByUsername(_)
            | Self::NotFoundByPhoneNumber(_)
            | Self::ResetTokenNotFound(_) => 404,
            Self::InvalidPassword => 401,
            Self::Domain(_)
            | Self::ResetTokenExpired(_)
            | Self::ResetTokenUsed(_)
            | Self::ResetTokenMismatch(_) => 400,
            Self::Preferences(err) => err.http_status(),
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account lifecycle orchestration service.
#[derive(Clone)]
pub struct AccountService<R, P, C>
where
    R: AccountRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    preferences: NotificationPreferencesService<P, C>,
    reset_tokens: Arc<dyn ResetTokenGuard>,
    clock: Arc<C>,
}

impl<R, P, C> AccountService<R, P, C>
where
    R: AccountRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        preferences: NotificationPreferencesService<P, C>,
        reset_tokens: Arc<dyn ResetTokenGuard>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            preferences,
            reset_tokens,
            clock,
        }
    }

    /// Creates an account with a username and password.
    ///
    /// Provisions default notification preferences (all channels
    /// enabled) as a dependent write.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::UsernameTaken`] when another
    /// active account holds the username, or validation, hashing, and
    /// persistence errors.
    pub async fn create_with_credentials(
        &self,
        request: CreateAccountRequest,
    ) -> AccountServiceResult<Account> {
        let CreateAccountRequest {
            first_name,
            last_name,
            username,
            password,
        } = request;

        let username = Username::new(username)?;
        // Pre-check for a friendlier conflict; the store's unique index
        // still backstops the window between check and insert.
        if self
            .repository
            .find_active_by_username(&username)
            .await?
            .is_some()
        {
            return Err(AccountServiceError::UsernameTaken(username));
        }

        let hashed_password = HashedPassword::hash(&password)?;
        let account = Account::new_with_credentials(
            AccountProfile::new(first_name, last_name),
            username,
            hashed_password,
            &*self.clock,
        );
        self.repository
            .insert(&account)
            .await
            .map_err(map_insert_conflict)?;

        self.preferences
            .upsert(account.id(), &PreferencesPatch::all_enabled())
            .await?;
        Ok(account)
    }

    /// Returns the active account for a phone number, creating one with
    /// a blank profile when none exists (idempotent).
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError`] on persistence failure or a lost
    /// creation race.
    pub async fn get_or_create_by_phone_number(
        &self,
        phone_number: PhoneNumber,
    ) -> AccountServiceResult<Account> {
        if let Some(account) = self
            .repository
            .find_active_by_phone_number(&phone_number)
            .await?
        {
            return Ok(account);
        }

        let account = Account::new_with_phone_number(phone_number, &*self.clock);
        self.repository
            .insert(&account)
            .await
            .map_err(map_insert_conflict)?;

        self.preferences
            .upsert(account.id(), &PreferencesPatch::all_enabled())
            .await?;
        Ok(account)
    }

    /// Returns the active account with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFoundById`] when absent or
    /// soft-deleted.
    pub async fn get_by_id(&self, id: AccountId) -> AccountServiceResult<Account> {
        self.repository
            .find_active_by_id(id)
            .await?
            .ok_or(AccountServiceError::NotFoundById(id))
    }

    /// Returns the active account with the given username.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFoundByUsername`] when absent
    /// or soft-deleted.
    pub async fn get_by_username(&self, username: &str) -> AccountServiceResult<Account> {
        let username = Username::new(username)?;
        self.repository
            .find_active_by_username(&username)
            .await?
            .ok_or(AccountServiceError::NotFoundByUsername(username))
    }

    /// Returns the active account with the given phone number.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFoundByPhoneNumber`] when
    /// absent or soft-deleted.
    pub async fn get_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> AccountServiceResult<Account> {
        self.repository
            .find_active_by_phone_number(phone_number)
            .await?
            .ok_or_else(|| AccountServiceError::NotFoundByPhoneNumber(phone_number.clone()))
    }

    /// Authenticates a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidPassword`] when the
    /// password does not match (including accounts that have no
    /// password set), or not-found when the username is unknown.
    pub async fn authenticate_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AccountServiceResult<Account> {
        let account = self.get_by_username(username).await?;
        let verified = account
            .hashed_password()
            .is_some_and(|digest| digest.verify(password));
        if !verified {
            return Err(AccountServiceError::InvalidPassword);
        }
        Ok(account)
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFoundById`] when the account
    /// is absent or soft-deleted.
    pub async fn update_profile(
        &self,
        id: AccountId,
        request: UpdateProfileRequest,
    ) -> AccountServiceResult<Account> {
        let mut account = self.get_by_id(id).await?;
        account.update_profile(request.first_name, request.last_name, &*self.clock);
        self.repository.update(&account).await?;
        Ok(account)
    }

    /// Resets the account password against a verified reset token.
    ///
    /// The token is consumed only after the new password has been
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns the matching reset-token error when verification fails,
    /// or not-found/persistence errors.
    pub async fn reset_password(
        &self,
        id: AccountId,
        presented_token: &str,
        new_password: &str,
    ) -> AccountServiceResult<Account> {
        let mut account = self.get_by_id(id).await?;
        let verified = self.reset_tokens.verify(id, presented_token).await?;

        let hashed_password = HashedPassword::hash(new_password)?;
        account.set_password(hashed_password, &*self.clock);
        self.repository.update(&account).await?;

        self.reset_tokens.consume(verified).await?;
        Ok(account)
    }

    /// Soft-deletes the account; its username/phone become reusable.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFoundById`] when the account
    /// is absent or already soft-deleted.
    pub async fn deactivate(&self, id: AccountId) -> AccountServiceResult<AccountDeletionReceipt> {
        let mut account = self.get_by_id(id).await?;
        account.deactivate(&*self.clock);
        self.repository.update(&account).await?;
        Ok(AccountDeletionReceipt {
            account_id: id,
            deleted_at: account.updated_at(),
        })
    }

    /// Returns the preferences service for this account context.
    #[must_use]
    pub const fn notification_preferences(&self) -> &NotificationPreferencesService<P, C> {
        &self.preferences
    }
}

/// Maps repository duplicate-identity conflicts (the unique-index
/// backstop firing) into the service's conflict variants.
fn map_insert_conflict(err: AccountRepositoryError) -> AccountServiceError {
    match err {
        AccountRepositoryError::DuplicateUsername(username) => {
            AccountServiceError::UsernameTaken(username)
        }
        AccountRepositoryError::DuplicatePhoneNumber(phone_number) => {
            AccountServiceError::PhoneNumberTaken(phone_number)
        }
        other => AccountServiceError::Repository(other),
    }
}

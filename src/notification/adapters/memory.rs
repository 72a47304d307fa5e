//! In-memory preference storage and message-recording providers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::domain::AccountId;
use crate::notification::{
    domain::{EmailMessage, NotificationPreferences, SmsMessage},
    ports::{
        EmailProvider, PreferencesRepository, PreferencesRepositoryError,
        PreferencesRepositoryResult, ProviderError, SmsProvider,
    },
};

/// Thread-safe in-memory preferences repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferencesRepository {
    state: Arc<RwLock<HashMap<AccountId, NotificationPreferences>>>,
}

impl InMemoryPreferencesRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryPreferencesRepository {
    async fn insert(
        &self,
        preferences: &NotificationPreferences,
    ) -> PreferencesRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PreferencesRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account_id = preferences.account_id();
        if state
            .get(&account_id)
            .is_some_and(NotificationPreferences::is_active)
        {
            return Err(PreferencesRepositoryError::DuplicatePreferences(account_id));
        }
        state.insert(account_id, preferences.clone());
        Ok(())
    }

    async fn update(
        &self,
        preferences: &NotificationPreferences,
    ) -> PreferencesRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PreferencesRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account_id = preferences.account_id();
        if !state.contains_key(&account_id) {
            return Err(PreferencesRepositoryError::NotFound(account_id));
        }
        state.insert(account_id, preferences.clone());
        Ok(())
    }

    async fn find_active_by_account(
        &self,
        account_id: AccountId,
    ) -> PreferencesRepositoryResult<Option<NotificationPreferences>> {
        let state = self.state.read().map_err(|err| {
            PreferencesRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .get(&account_id)
            .filter(|preferences| preferences.is_active())
            .cloned())
    }
}

/// Email provider that records every message it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailProvider {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
}

impl RecordingEmailProvider {
    /// Creates a provider with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailProvider for RecordingEmailProvider {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), ProviderError> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| ProviderError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(message.clone());
        Ok(())
    }
}

/// SMS provider that records every message it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingSmsProvider {
    sent: Arc<RwLock<Vec<SmsMessage>>>,
}

impl RecordingSmsProvider {
    /// Creates a provider with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.read().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SmsProvider for RecordingSmsProvider {
    async fn send_sms(&self, message: &SmsMessage) -> Result<(), ProviderError> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| ProviderError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(message.clone());
        Ok(())
    }
}

//! Preference-gated delivery in front of the provider ports.

use crate::account::domain::AccountId;
use crate::error::ErrorCode;
use crate::notification::{
    domain::{Channel, EmailMessage, NotificationDomainError, SmsMessage},
    ports::{
        EmailProvider, PreferencesRepository, PreferencesRepositoryError, ProviderError,
        SmsProvider,
    },
};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a gated send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider was invoked.
    Sent,
    /// The recipient has opted out of the channel; nothing was sent.
    SkippedByPreferences,
}

/// Service-level errors for gated delivery.
#[derive(Debug, Error)]
pub enum NotificationSendError {
    /// Payload construction failed.
    #[error(transparent)]
    Domain(#[from] NotificationDomainError),
    /// Preference lookup failed.
    #[error(transparent)]
    Repository(#[from] PreferencesRepositoryError),
    /// The delivery provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ErrorCode for NotificationSendError {
    fn code(&self) -> &'static str {
        match self {
            Self::Domain(_) => "NOTIFICATION_ERR_02",
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
            Self::Provider(_) => "NOTIFICATION_ERR_03",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::Domain(_) => 400,
            Self::Repository(_) => 500,
            Self::Provider(_) => 503,
        }
    }
}

/// Gated dispatcher over the email/SMS provider ports.
///
/// Loads the recipient's preferences unless the caller bypasses them;
/// an absent preferences row reads as all channels enabled (the
/// defaults a fresh account would be provisioned with).
#[derive(Clone)]
pub struct NotificationDispatcher<P>
where
    P: PreferencesRepository,
{
    preferences: Arc<P>,
    email_provider: Arc<dyn EmailProvider>,
    sms_provider: Arc<dyn SmsProvider>,
}

impl<P> NotificationDispatcher<P>
where
    P: PreferencesRepository,
{
    /// Creates a new dispatcher.
    #[must_use]
    pub fn new(
        preferences: Arc<P>,
        email_provider: Arc<dyn EmailProvider>,
        sms_provider: Arc<dyn SmsProvider>,
    ) -> Self {
        Self {
            preferences,
            email_provider,
            sms_provider,
        }
    }

    /// Sends an email unless the recipient has opted out.
    ///
    /// `bypass_preferences` skips the gate for security-critical mail
    /// (password reset); such mail always sends.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSendError`] when the preference lookup or
    /// the provider fails.
    pub async fn send_email(
        &self,
        account_id: AccountId,
        message: &EmailMessage,
        bypass_preferences: bool,
    ) -> Result<SendOutcome, NotificationSendError> {
        if !bypass_preferences && !self.channel_enabled(account_id, Channel::Email).await? {
            tracing::info!(
                account_id = %account_id,
                channel = Channel::Email.as_str(),
                "notification skipped: recipient opted out"
            );
            return Ok(SendOutcome::SkippedByPreferences);
        }
        self.email_provider.send_email(message).await?;
        Ok(SendOutcome::Sent)
    }

    /// Sends an SMS unless the recipient has opted out.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSendError`] when the preference lookup or
    /// the provider fails.
    pub async fn send_sms(
        &self,
        account_id: AccountId,
        message: &SmsMessage,
        bypass_preferences: bool,
    ) -> Result<SendOutcome, NotificationSendError> {
        if !bypass_preferences && !self.channel_enabled(account_id, Channel::Sms).await? {
            tracing::info!(
                account_id = %account_id,
                channel = Channel::Sms.as_str(),
                "notification skipped: recipient opted out"
            );
            return Ok(SendOutcome::SkippedByPreferences);
        }
        self.sms_provider.send_sms(message).await?;
        Ok(SendOutcome::Sent)
    }

    async fn channel_enabled(
        &self,
        account_id: AccountId,
        channel: Channel,
    ) -> Result<bool, PreferencesRepositoryError> {
        let preferences = self.preferences.find_active_by_account(account_id).await?;
        Ok(preferences.is_none_or(|prefs| prefs.channel_enabled(channel)))
    }
}

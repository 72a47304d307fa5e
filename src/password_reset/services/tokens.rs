//! Service layer for reset-token issuance, verification, and the
//! reset-guard port.

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::account::domain::{Account, AccountId};
use crate::account::ports::{ResetTokenGuard, ResetTokenGuardError, VerifiedResetToken};
use crate::config::{MailerSettings, PasswordResetSettings};
use crate::error::ErrorCode;
use crate::notification::domain::{EmailMessage, EmailSender, EmailTemplate};
use crate::notification::ports::PreferencesRepository;
use crate::notification::services::{NotificationDispatcher, NotificationSendError};
use crate::password_reset::{
    domain::{
        PasswordResetDomainError, PasswordResetToken, PasswordResetTokenId, RawResetToken,
        ResetTokenDigest,
    },
    ports::{PasswordResetTokenRepository, ResetTokenRepositoryError},
};

/// Subject template for the reset email.
const RESET_EMAIL_SUBJECT: &str = "Reset your password";

/// Body template for the reset email.
const RESET_EMAIL_BODY: &str = "Hi {{ first_name }},\n\n\
We received a request to reset the password for your account. Use the \
link below within the next hour to choose a new password.\n\n\
{{ reset_link }}\n\n\
If you did not request this, you can safely ignore this email.";

/// Service-level errors for reset-token operations.
#[derive(Debug, Error)]
pub enum PasswordResetServiceError {
    /// No reset token has been issued for the account.
    #[error("no password reset token found for account {0}")]
    TokenNotFound(AccountId),
    /// The most recent token is past its expiry.
    #[error("password reset link is expired for account {0}, request a new link")]
    TokenExpired(AccountId),
    /// The most recent token was already used.
    #[error("password reset token is already used for account {0}, request a new link")]
    TokenUsed(AccountId),
    /// The presented token does not match the stored digest.
    #[error("password reset link is invalid for account {0}, request a new link")]
    TokenMismatch(AccountId),
    /// The account has no username to email the link to.
    #[error("account {0} has no email address on file")]
    NoEmailAddress(AccountId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PasswordResetDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ResetTokenRepositoryError),
    /// The reset email could not be rendered or delivered.
    #[error(transparent)]
    Notification(#[from] NotificationSendError),
}

impl ErrorCode for PasswordResetServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::TokenNotFound(_) => "PASSWORD_RESET_TOKEN_ERR_01",
            Self::TokenExpired(_)
            | Self::TokenUsed(_)
            | Self::TokenMismatch(_)
            | Self::NoEmailAddress(_)
            | Self::Domain(_) => "ACCOUNT_ERR_04",
            Self::Notification(err) => err.code(),
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::TokenNotFound(_) => 404,
            Self::TokenExpired(_)
            | Self::TokenUsed(_)
            | Self::TokenMismatch(_)
            | Self::NoEmailAddress(_)
            | Self::Domain(_) => 400,
            Self::Notification(err) => err.http_status(),
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for reset-token service operations.
pub type PasswordResetServiceResult<T> = Result<T, PasswordResetServiceError>;

/// Reset-token issuance and verification service.
///
/// Also implements the account context's [`ResetTokenGuard`] port, so
/// the account service can demand token evidence without knowing how
/// tokens are stored.
pub struct PasswordResetService<R, P, C>
where
    R: PasswordResetTokenRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    dispatcher: NotificationDispatcher<P>,
    settings: PasswordResetSettings,
    mailer: MailerSettings,
    clock: Arc<C>,
}

impl<R, P, C> Clone for PasswordResetService<R, P, C>
where
    R: PasswordResetTokenRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
    NotificationDispatcher<P>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            dispatcher: self.dispatcher.clone(),
            settings: self.settings.clone(),
            mailer: self.mailer.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P, C> PasswordResetService<R, P, C>
where
    R: PasswordResetTokenRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new reset-token service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        dispatcher: NotificationDispatcher<P>,
        settings: PasswordResetSettings,
        mailer: MailerSettings,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            dispatcher,
            settings,
            mailer,
            clock,
        }
    }

    /// Issues a reset token for an account and emails the raw value.
    ///
    /// The email bypasses notification preferences: an opted-out
    /// account must still be able to recover its password. Returns the
    /// stored record together with the raw token for callers that
    /// surface it through another channel.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordResetServiceError::NoEmailAddress`] for
    /// accounts without a username, or hashing, persistence, and
    /// delivery errors.
    pub async fn create_for_account(
        &self,
        account: &Account,
    ) -> PasswordResetServiceResult<(PasswordResetToken, RawResetToken)> {
        let recipient = account
            .username()
            .map(|username| username.as_str().to_owned())
            .ok_or_else(|| PasswordResetServiceError::NoEmailAddress(account.id()))?;

        let raw_token = RawResetToken::generate();
        let digest = ResetTokenDigest::hash(&raw_token)?;
        let expires_at = self.clock.utc() + Duration::seconds(self.settings.token_ttl_seconds);
        let token = PasswordResetToken::new(account.id(), digest, expires_at, &*self.clock);
        self.repository.insert(&token).await?;

        let reset_link = format!(
            "{}/accounts/{}/reset_password?token={}",
            self.settings.web_app_host,
            account.id(),
            raw_token
        );
        let rendered = EmailTemplate::new(RESET_EMAIL_SUBJECT, RESET_EMAIL_BODY)
            .render(&json!({
                "first_name": account.profile().first_name,
                "reset_link": reset_link,
            }))
            .map_err(NotificationSendError::from)?;

        let message = EmailMessage {
            sender: EmailSender::new(&self.mailer.sender_email, &self.mailer.sender_name),
            recipient,
            subject: rendered.subject,
            body: rendered.body,
        };
        self.dispatcher
            .send_email(account.id(), &message, true)
            .await?;

        Ok((token, raw_token))
    }

    /// Verifies a presented raw token against the account's most
    /// recently issued record without consuming it.
    ///
    /// # Errors
    ///
    /// Returns the matching error kind when no token exists, the token
    /// expired, was already used, or the digest comparison fails:
    /// three distinct user-visible failures plus not-found.
    pub async fn verify(
        &self,
        account_id: AccountId,
        presented: &str,
    ) -> PasswordResetServiceResult<PasswordResetToken> {
        let token = self
            .repository
            .find_latest_by_account(account_id)
            .await?
            .ok_or(PasswordResetServiceError::TokenNotFound(account_id))?;

        if token.is_expired(self.clock.utc()) {
            return Err(PasswordResetServiceError::TokenExpired(account_id));
        }
        if token.is_used() {
            return Err(PasswordResetServiceError::TokenUsed(account_id));
        }
        if !token.digest().matches(presented) {
            return Err(PasswordResetServiceError::TokenMismatch(account_id));
        }
        Ok(token)
    }

    /// Marks a token as used once the password change has completed.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordResetServiceError::Repository`] when the
    /// record is missing or persistence fails.
    pub async fn mark_used(
        &self,
        id: PasswordResetTokenId,
    ) -> PasswordResetServiceResult<PasswordResetToken> {
        let mut token = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PasswordResetServiceError::Repository(
                ResetTokenRepositoryError::NotFound(id),
            ))?;
        token.mark_used();
        self.repository.update(&token).await?;
        Ok(token)
    }
}

#[async_trait]
impl<R, P, C> ResetTokenGuard for PasswordResetService<R, P, C>
where
    R: PasswordResetTokenRepository,
    P: PreferencesRepository,
    C: Clock + Send + Sync,
{
    async fn verify(
        &self,
        account_id: AccountId,
        presented: &str,
    ) -> Result<VerifiedResetToken, ResetTokenGuardError> {
        match Self::verify(self, account_id, presented).await {
            Ok(token) => Ok(VerifiedResetToken::new(token.id().into_inner())),
            Err(PasswordResetServiceError::TokenNotFound(id)) => {
                Err(ResetTokenGuardError::NotFound(id))
            }
            Err(PasswordResetServiceError::TokenExpired(id)) => {
                Err(ResetTokenGuardError::Expired(id))
            }
            Err(PasswordResetServiceError::TokenUsed(id)) => {
                Err(ResetTokenGuardError::AlreadyUsed(id))
            }
            Err(PasswordResetServiceError::TokenMismatch(id)) => {
                Err(ResetTokenGuardError::Mismatch(id))
            }
            Err(other) => Err(ResetTokenGuardError::upstream(other)),
        }
    }

    async fn consume(&self, token: VerifiedResetToken) -> Result<(), ResetTokenGuardError> {
        self.mark_used(PasswordResetTokenId::from_uuid(token.into_inner()))
            .await
            .map(|_| ())
            .map_err(ResetTokenGuardError::upstream)
    }
}

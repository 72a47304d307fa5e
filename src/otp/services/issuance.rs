//! Service layer for OTP issuance, expiry, and verification.

use crate::account::domain::PhoneNumber;
use crate::config::OtpSettings;
use crate::error::ErrorCode;
use crate::notification::domain::SmsMessage;
use crate::notification::ports::{ProviderError, SmsProvider};
use crate::otp::{
    domain::{Otp, OtpCode, OtpDomainError},
    ports::{OtpRepository, OtpRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for OTP operations.
#[derive(Debug, Error)]
pub enum OtpServiceError {
    /// No issued code matches the phone number and code.
    #[error("please provide the correct OTP to login")]
    IncorrectOtp,
    /// The matching code is no longer active.
    #[error("the OTP has expired, request a new one")]
    OtpExpired,
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] OtpDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] OtpRepositoryError),
    /// The SMS provider failed the delivery.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ErrorCode for OtpServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::IncorrectOtp => "OTP_ERR_01",
            Self::OtpExpired => "OTP_ERR_02",
            Self::Domain(_) => "OTP_ERR_03",
            Self::Provider(_) => "NOTIFICATION_ERR_03",
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::IncorrectOtp | Self::OtpExpired | Self::Domain(_) => 400,
            Self::Provider(_) => 503,
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for OTP service operations.
pub type OtpServiceResult<T> = Result<T, OtpServiceError>;

/// OTP issuance and verification service.
#[derive(Clone)]
pub struct OtpService<R, C>
where
    R: OtpRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    sms_provider: Arc<dyn SmsProvider>,
    settings: OtpSettings,
    clock: Arc<C>,
}

impl<R, C> OtpService<R, C>
where
    R: OtpRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new OTP service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        sms_provider: Arc<dyn SmsProvider>,
        settings: OtpSettings,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            sms_provider,
            settings,
            clock,
        }
    }

    /// Issues a fresh OTP for a phone number.
    ///
    /// All previously active codes for the number are expired first
    /// (sequential updates; the uniqueness of the active code is
    /// best-effort across concurrent issuers). Whitelisted test numbers
    /// receive the configured fixed code and no real SMS.
    ///
    /// # Errors
    ///
    /// Returns [`OtpServiceError`] on persistence or delivery failure,
    /// or when the configured default code is malformed.
    pub async fn create(&self, phone_number: PhoneNumber) -> OtpServiceResult<Otp> {
        for mut previous in self
            .repository
            .list_active_by_phone(&phone_number)
            .await?
        {
            previous.mark_expired();
            self.repository.update(&previous).await?;
        }

        let is_default = self.settings.is_default_number(&phone_number.to_string());
        let code = match (is_default, self.settings.default_code.as_deref()) {
            (true, Some(default_code)) => OtpCode::new(default_code)?,
            _ => OtpCode::random(),
        };

        let otp = Otp::new(phone_number.clone(), code, &*self.clock);
        self.repository.insert(&otp).await?;

        if is_default {
            tracing::info!(phone_number = %phone_number, "default OTP issued, skipping SMS");
        } else {
            let message = SmsMessage {
                recipient: phone_number,
                body: format!(
                    "{} is your One Time Password (OTP) for verification.",
                    otp.code()
                ),
            };
            self.sms_provider.send_sms(&message).await?;
        }

        Ok(otp)
    }

    /// Verifies a presented code for a phone number.
    ///
    /// A code verifies at most once: the first success retires it, and
    /// any later attempt with the same code reports expiry rather than
    /// incorrectness.
    ///
    /// # Errors
    ///
    /// Returns [`OtpServiceError::IncorrectOtp`] when nothing matches,
    /// [`OtpServiceError::OtpExpired`] when the match is inactive, or a
    /// repository error.
    pub async fn verify(
        &self,
        phone_number: &PhoneNumber,
        presented_code: &str,
    ) -> OtpServiceResult<Otp> {
        let Ok(code) = OtpCode::new(presented_code) else {
            return Err(OtpServiceError::IncorrectOtp);
        };

        let mut otp = self
            .repository
            .find_latest_by_phone_and_code(phone_number, &code)
            .await?
            .ok_or(OtpServiceError::IncorrectOtp)?;

        if !otp.is_active() {
            return Err(OtpServiceError::OtpExpired);
        }

        otp.mark_verified();
        self.repository.update(&otp).await?;
        Ok(otp)
    }
}

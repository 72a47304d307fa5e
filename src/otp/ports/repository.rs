//! Repository port for OTP persistence and lookup.

use crate::account::domain::PhoneNumber;
use crate::otp::domain::{Otp, OtpCode, OtpId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for OTP repository operations.
pub type OtpRepositoryResult<T> = Result<T, OtpRepositoryError>;

/// OTP persistence contract.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Stores a new OTP record.
    ///
    /// # Errors
    ///
    /// Returns [`OtpRepositoryError::DuplicateOtp`] when the ID exists.
    async fn insert(&self, otp: &Otp) -> OtpRepositoryResult<()>;

    /// Persists status/active changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`OtpRepositoryError::NotFound`] when the record does
    /// not exist.
    async fn update(&self, otp: &Otp) -> OtpRepositoryResult<()>;

    /// Returns all still-active OTPs for a phone number.
    async fn list_active_by_phone(
        &self,
        phone_number: &PhoneNumber,
    ) -> OtpRepositoryResult<Vec<Otp>>;

    /// Finds the most recently issued OTP matching phone number and
    /// code (creation order descending, identifier as tie-break).
    async fn find_latest_by_phone_and_code(
        &self,
        phone_number: &PhoneNumber,
        code: &OtpCode,
    ) -> OtpRepositoryResult<Option<Otp>>;
}

/// Errors returned by OTP repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OtpRepositoryError {
    /// An OTP with the same identifier already exists.
    #[error("duplicate OTP identifier: {0}")]
    DuplicateOtp(OtpId),

    /// The OTP record was not found.
    #[error("OTP not found: {0}")]
    NotFound(OtpId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OtpRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

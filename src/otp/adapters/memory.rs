//! In-memory OTP repository for tests and local composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::domain::PhoneNumber;
use crate::otp::{
    domain::{Otp, OtpCode, OtpId},
    ports::{OtpRepository, OtpRepositoryError, OtpRepositoryResult},
};

/// Thread-safe in-memory OTP repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOtpRepository {
    state: Arc<RwLock<HashMap<OtpId, Otp>>>,
}

impl InMemoryOtpRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn insert(&self, otp: &Otp) -> OtpRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OtpRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&otp.id()) {
            return Err(OtpRepositoryError::DuplicateOtp(otp.id()));
        }
        state.insert(otp.id(), otp.clone());
        Ok(())
    }

    async fn update(&self, otp: &Otp) -> OtpRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OtpRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&otp.id()) {
            return Err(OtpRepositoryError::NotFound(otp.id()));
        }
        state.insert(otp.id(), otp.clone());
        Ok(())
    }

    async fn list_active_by_phone(
        &self,
        phone_number: &PhoneNumber,
    ) -> OtpRepositoryResult<Vec<Otp>> {
        let state = self.state.read().map_err(|err| {
            OtpRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .filter(|otp| otp.is_active() && otp.phone_number() == phone_number)
            .cloned()
            .collect())
    }

    async fn find_latest_by_phone_and_code(
        &self,
        phone_number: &PhoneNumber,
        code: &OtpCode,
    ) -> OtpRepositoryResult<Option<Otp>> {
        let state = self.state.read().map_err(|err| {
            OtpRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matches: Vec<&Otp> = state
            .values()
            .filter(|otp| otp.phone_number() == phone_number && otp.code() == code)
            .collect();
        matches.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
        });
        Ok(matches.first().map(|otp| (*otp).clone()))
    }
}

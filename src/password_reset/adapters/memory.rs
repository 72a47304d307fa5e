//! In-memory reset-token repository for tests and local composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::domain::AccountId;
use crate::password_reset::{
    domain::{PasswordResetToken, PasswordResetTokenId},
    ports::{PasswordResetTokenRepository, ResetTokenRepositoryError, ResetTokenRepositoryResult},
};

/// Thread-safe in-memory reset-token repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResetTokenRepository {
    state: Arc<RwLock<HashMap<PasswordResetTokenId, PasswordResetToken>>>,
}

impl InMemoryResetTokenRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasswordResetTokenRepository for InMemoryResetTokenRepository {
    async fn insert(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ResetTokenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&token.id()) {
            return Err(ResetTokenRepositoryError::DuplicateToken(token.id()));
        }
        state.insert(token.id(), token.clone());
        Ok(())
    }

    async fn update(&self, token: &PasswordResetToken) -> ResetTokenRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ResetTokenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&token.id()) {
            return Err(ResetTokenRepositoryError::NotFound(token.id()));
        }
        state.insert(token.id(), token.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: PasswordResetTokenId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>> {
        let state = self.state.read().map_err(|err| {
            ResetTokenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_latest_by_account(
        &self,
        account_id: AccountId,
    ) -> ResetTokenRepositoryResult<Option<PasswordResetToken>> {
        let state = self.state.read().map_err(|err| {
            ResetTokenRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tokens: Vec<&PasswordResetToken> = state
            .values()
            .filter(|token| token.account_id() == account_id)
            .collect();
        tokens.sort_by(|a, b| {
            b.expires_at()
                .cmp(&a.expires_at())
                .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
        });
        Ok(tokens.first().map(|token| (*token).clone()))
    }
}

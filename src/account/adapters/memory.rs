//! In-memory account repository for tests and local composition.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::{Account, AccountId, PhoneNumber, Username},
    ports::{AccountRepository, AccountRepositoryError, AccountRepositoryResult},
};

/// Thread-safe in-memory account repository.
///
/// Username/phone indexes track active accounts only, so soft-deleted
/// identities become reusable exactly as the store-level partial unique
/// indexes allow.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<RwLock<InMemoryAccountState>>,
}

#[derive(Debug, Default)]
struct InMemoryAccountState {
    accounts: HashMap<AccountId, Account>,
    username_index: HashMap<Username, AccountId>,
    phone_index: HashMap<PhoneNumber, AccountId>,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_identity_free(
    state: &InMemoryAccountState,
    account: &Account,
) -> AccountRepositoryResult<()> {
    if let Some(username) = account.username()
        && let Some(&holder) = state.username_index.get(username)
        && holder != account.id()
    {
        return Err(AccountRepositoryError::DuplicateUsername(username.clone()));
    }
    if let Some(phone_number) = account.phone_number()
        && let Some(&holder) = state.phone_index.get(phone_number)
        && holder != account.id()
    {
        return Err(AccountRepositoryError::DuplicatePhoneNumber(
            phone_number.clone(),
        ));
    }
    Ok(())
}

fn index_identities(state: &mut InMemoryAccountState, account: &Account) {
    if !account.is_active() {
        return;
    }
    if let Some(username) = account.username() {
        state.username_index.insert(username.clone(), account.id());
    }
    if let Some(phone_number) = account.phone_number() {
        state
            .phone_index
            .insert(phone_number.clone(), account.id());
    }
}

fn unindex_identities(state: &mut InMemoryAccountState, account: &Account) {
    if let Some(username) = account.username() {
        state.username_index.remove(username);
    }
    if let Some(phone_number) = account.phone_number() {
        state.phone_index.remove(phone_number);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.accounts.contains_key(&account.id()) {
            return Err(AccountRepositoryError::DuplicateAccount(account.id()));
        }
        check_identity_free(&state, account)?;
        index_identities(&mut state, account);
        state.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> AccountRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_account = state
            .accounts
            .get(&account.id())
            .ok_or(AccountRepositoryError::NotFound(account.id()))?
            .clone();

        check_identity_free(&state, account)?;
        if old_account.is_active() {
            unindex_identities(&mut state, &old_account);
        }
        index_identities(&mut state, account);
        state.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_active_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .accounts
            .get(&id)
            .filter(|account| account.is_active())
            .cloned())
    }

    async fn find_active_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .username_index
            .get(username)
            .and_then(|id| state.accounts.get(id))
            .filter(|account| account.is_active())
            .cloned();
        Ok(account)
    }

    async fn find_active_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .phone_index
            .get(phone_number)
            .and_then(|id| state.accounts.get(id))
            .filter(|account| account.is_active())
            .cloned();
        Ok(account)
    }
}

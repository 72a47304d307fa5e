//! Account aggregate root and lifecycle mutations.

use super::{AccountId, HashedPassword, PhoneNumber, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Display-name fields carried by an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Given name; empty until the owner fills in their profile.
    pub first_name: String,
    /// Family name; empty until the owner fills in their profile.
    pub last_name: String,
}

impl AccountProfile {
    /// Creates a profile from given and family name.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Account aggregate root.
///
/// An account is created through exactly one of two flows: credentials
/// (username + password, profile supplied) or phone number (blank
/// profile, no password). Deletion is a soft flag flip; inactive
/// accounts are invisible to every lookup and their username/phone
/// become reusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    profile: AccountProfile,
    hashed_password: Option<HashedPassword>,
    username: Option<Username>,
    phone_number: Option<PhoneNumber>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccountData {
    /// Persisted account identifier.
    pub id: AccountId,
    /// Persisted profile fields.
    pub profile: AccountProfile,
    /// Persisted password digest, if the account has one.
    pub hashed_password: Option<HashedPassword>,
    /// Persisted username, if set.
    pub username: Option<Username>,
    /// Persisted phone number, if set.
    pub phone_number: Option<PhoneNumber>,
    /// Persisted soft-delete flag.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates an account through the credentials flow.
    #[must_use]
    pub fn new_with_credentials(
        profile: AccountProfile,
        username: Username,
        hashed_password: HashedPassword,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AccountId::new(),
            profile,
            hashed_password: Some(hashed_password),
            username: Some(username),
            phone_number: None,
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Creates an account through the phone-number flow.
    ///
    /// Profile fields start blank and no password is set; OTP login is
    /// the only authentication method until a password reset assigns
    /// one.
    #[must_use]
    pub fn new_with_phone_number(phone_number: PhoneNumber, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AccountId::new(),
            profile: AccountProfile::default(),
            hashed_password: None,
            username: None,
            phone_number: Some(phone_number),
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAccountData) -> Self {
        Self {
            id: data.id,
            profile: data.profile,
            hashed_password: data.hashed_password,
            username: data.username,
            phone_number: data.phone_number,
            active: data.active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    /// Returns the password digest, if the account has one.
    #[must_use]
    pub const fn hashed_password(&self) -> Option<&HashedPassword> {
        self.hashed_password.as_ref()
    }

    /// Returns the username, if set.
    #[must_use]
    pub const fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    /// Returns the phone number, if set.
    #[must_use]
    pub const fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    /// Returns whether the account is active (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial profile update; `None` fields keep their
    /// current value.
    pub fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        clock: &impl Clock,
    ) {
        if let Some(first_name) = first_name {
            self.profile.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.profile.last_name = last_name;
        }
        self.touch(clock);
    }

    /// Replaces the password digest.
    pub fn set_password(&mut self, hashed_password: HashedPassword, clock: &impl Clock) {
        self.hashed_password = Some(hashed_password);
        self.touch(clock);
    }

    /// Soft-deletes the account.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.active = false;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

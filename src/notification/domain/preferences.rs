//! Notification-preferences aggregate and partial-patch semantics.

use crate::account::domain::AccountId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Delivery channel gated by preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Email delivery.
    Email,
    /// Mobile push delivery.
    Push,
    /// SMS delivery.
    Sms,
}

impl Channel {
    /// Returns the canonical channel name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
            Self::Sms => "sms",
        }
    }
}

/// Partial update of preference booleans.
///
/// `None` means "leave untouched". The tri-state is the contract that
/// lets callers flip a single channel without clobbering the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    /// Email opt-in override, if provided.
    pub email_enabled: Option<bool>,
    /// Push opt-in override, if provided.
    pub push_enabled: Option<bool>,
    /// SMS opt-in override, if provided.
    pub sms_enabled: Option<bool>,
}

impl PreferencesPatch {
    /// Creates an empty patch (no fields provided).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            email_enabled: None,
            push_enabled: None,
            sms_enabled: None,
        }
    }

    /// Creates a patch enabling every channel, used when provisioning
    /// defaults for a fresh account.
    #[must_use]
    pub const fn all_enabled() -> Self {
        Self {
            email_enabled: Some(true),
            push_enabled: Some(true),
            sms_enabled: Some(true),
        }
    }

    /// Sets the email override.
    #[must_use]
    pub const fn with_email_enabled(mut self, enabled: bool) -> Self {
        self.email_enabled = Some(enabled);
        self
    }

    /// Sets the push override.
    #[must_use]
    pub const fn with_push_enabled(mut self, enabled: bool) -> Self {
        self.push_enabled = Some(enabled);
        self
    }

    /// Sets the SMS override.
    #[must_use]
    pub const fn with_sms_enabled(mut self, enabled: bool) -> Self {
        self.sms_enabled = Some(enabled);
        self
    }
}

/// Per-account notification preferences; one active row per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    account_id: AccountId,
    email_enabled: bool,
    push_enabled: bool,
    sms_enabled: bool,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPreferencesData {
    /// Owning account.
    pub account_id: AccountId,
    /// Persisted email opt-in.
    pub email_enabled: bool,
    /// Persisted push opt-in.
    pub push_enabled: bool,
    /// Persisted SMS opt-in.
    pub sms_enabled: bool,
    /// Persisted active flag.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreferences {
    /// Creates preferences for an account, merging defaults (all
    /// channels enabled) over the explicitly provided patch fields.
    #[must_use]
    pub fn new(account_id: AccountId, patch: &PreferencesPatch, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            account_id,
            email_enabled: patch.email_enabled.unwrap_or(true),
            push_enabled: patch.push_enabled.unwrap_or(true),
            sms_enabled: patch.sms_enabled.unwrap_or(true),
            active: true,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs preferences from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedPreferencesData) -> Self {
        Self {
            account_id: data.account_id,
            email_enabled: data.email_enabled,
            push_enabled: data.push_enabled,
            sms_enabled: data.sms_enabled,
            active: data.active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning account identifier.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns whether delivery on the given channel is opted in.
    #[must_use]
    pub const fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email_enabled,
            Channel::Push => self.push_enabled,
            Channel::Sms => self.sms_enabled,
        }
    }

    /// Returns whether the row is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial patch; absent fields keep their prior value.
    pub fn apply_patch(&mut self, patch: &PreferencesPatch, clock: &impl Clock) {
        if let Some(enabled) = patch.email_enabled {
            self.email_enabled = enabled;
        }
        if let Some(enabled) = patch.push_enabled {
            self.push_enabled = enabled;
        }
        if let Some(enabled) = patch.sms_enabled {
            self.sms_enabled = enabled;
        }
        self.updated_at = clock.utc();
    }
}

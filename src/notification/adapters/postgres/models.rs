//! Diesel model types for notification-preferences persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::notification_preferences;

/// Database row representation of a preferences record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notification_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PreferencesRow {
    /// Owning account identifier.
    pub account_id: Uuid,
    /// Email opt-in.
    pub email_enabled: bool,
    /// Push opt-in.
    pub push_enabled: bool,
    /// SMS opt-in.
    pub sms_enabled: bool,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable column set applied on preference updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = notification_preferences)]
pub struct PreferencesChanges {
    /// Email opt-in.
    pub email_enabled: bool,
    /// Push opt-in.
    pub push_enabled: bool,
    /// SMS opt-in.
    pub sms_enabled: bool,
    /// Soft-delete flag.
    pub active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

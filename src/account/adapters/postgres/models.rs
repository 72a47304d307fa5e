//! Diesel model types for account persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::accounts;

/// Database row representation of an account.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    /// Internal account identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Password digest, if set.
    pub hashed_password: Option<String>,
    /// Login username, if set.
    pub username: Option<String>,
    /// Phone country code, if set.
    pub phone_country_code: Option<String>,
    /// Phone local number, if set.
    pub phone_local_number: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    /// Internal account identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Password digest, if set.
    pub hashed_password: Option<String>,
    /// Login username, if set.
    pub username: Option<String>,
    /// Phone country code, if set.
    pub phone_country_code: Option<String>,
    /// Phone local number, if set.
    pub phone_local_number: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable column set applied when persisting aggregate changes.
///
/// The aggregate is the source of truth, so a `None` digest writes NULL
/// rather than skipping the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(treat_none_as_null = true)]
pub struct AccountChanges {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Password digest, if set.
    pub hashed_password: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

//! Diesel model types for OTP persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::otps;

/// Database row representation of an OTP record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = otps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OtpRow {
    /// Internal OTP identifier.
    pub id: Uuid,
    /// Phone country code.
    pub phone_country_code: String,
    /// Phone local number.
    pub phone_local_number: String,
    /// The issued code.
    pub otp_code: String,
    /// Issuance state.
    pub status: String,
    /// Whether the code can still verify.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Mutable column set applied when retiring or consuming a code.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = otps)]
pub struct OtpChanges {
    /// Issuance state.
    pub status: String,
    /// Whether the code can still verify.
    pub active: bool,
}

//! Diesel model types for reset-token persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::password_reset_tokens;

/// Database row representation of a reset-token record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = password_reset_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResetTokenRow {
    /// Internal token identifier.
    pub id: Uuid,
    /// Owning account identifier.
    pub account_id: Uuid,
    /// Storage digest of the raw token.
    pub token_digest: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Single-use flag.
    pub is_used: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

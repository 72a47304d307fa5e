//! Diesel schema for account persistence.
//!
//! Uniqueness of username and phone number among active rows is
//! enforced by partial unique indexes
//! (`accounts_active_username_idx`, `accounts_active_phone_idx`); the
//! application-level pre-checks only improve error messaging.

diesel::table! {
    /// Account records for both credential and phone-number identities.
    accounts (id) {
        /// Internal account identifier.
        id -> Uuid,
        /// Given name; empty for phone-created accounts.
        #[max_length = 255]
        first_name -> Varchar,
        /// Family name; empty for phone-created accounts.
        #[max_length = 255]
        last_name -> Varchar,
        /// Argon2id password digest in PHC format, if set.
        #[max_length = 255]
        hashed_password -> Nullable<Varchar>,
        /// Login username, if set.
        #[max_length = 255]
        username -> Nullable<Varchar>,
        /// `+`-prefixed country code, if a phone number is set.
        #[max_length = 8]
        phone_country_code -> Nullable<Varchar>,
        /// Digits-only local number, if a phone number is set.
        #[max_length = 16]
        phone_local_number -> Nullable<Varchar>,
        /// Soft-delete flag.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

//! Diesel schema for reset-token persistence.

diesel::table! {
    /// Hashed, expiring, single-use password-reset tokens.
    password_reset_tokens (id) {
        /// Internal token identifier.
        id -> Uuid,
        /// Owning account identifier.
        account_id -> Uuid,
        /// Argon2id digest of the raw token in PHC format.
        #[max_length = 255]
        token_digest -> Varchar,
        /// Absolute expiry.
        expires_at -> Timestamptz,
        /// Single-use flag.
        is_used -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

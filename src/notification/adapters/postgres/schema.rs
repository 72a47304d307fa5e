//! Diesel schema for notification-preferences persistence.

diesel::table! {
    /// Per-account notification opt-in booleans; keyed by account.
    notification_preferences (account_id) {
        /// Owning account identifier.
        account_id -> Uuid,
        /// Email opt-in.
        email_enabled -> Bool,
        /// Push opt-in.
        push_enabled -> Bool,
        /// SMS opt-in.
        sms_enabled -> Bool,
        /// Soft-delete flag.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

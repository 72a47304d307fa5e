//! Diesel schema for OTP persistence.

diesel::table! {
    /// One-time-password issuance records.
    otps (id) {
        /// Internal OTP identifier.
        id -> Uuid,
        /// `+`-prefixed country code of the target phone number.
        #[max_length = 8]
        phone_country_code -> Varchar,
        /// Digits-only local number of the target phone number.
        #[max_length = 16]
        phone_local_number -> Varchar,
        /// The issued four-digit code.
        #[max_length = 8]
        otp_code -> Varchar,
        /// Issuance state (PENDING, SUCCESS, EXPIRED).
        #[max_length = 16]
        status -> Varchar,
        /// Whether the code can still verify.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

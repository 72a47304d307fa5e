//! OTP aggregate root and issuance lifecycle.

use super::{OtpCode, ParseOtpStatusError};
use crate::account::domain::PhoneNumber;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an OTP record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpId(Uuid);

impl OtpId {
    /// Creates a new random OTP identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OTP identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OtpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OtpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issuance state of an OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpStatus {
    /// Issued and awaiting verification.
    Pending,
    /// Verified successfully (single use consumed).
    Success,
    /// Superseded by a newer code or rejected after use.
    Expired,
}

impl OtpStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Expired => "EXPIRED",
        }
    }
}

impl TryFrom<&str> for OtpStatus {
    type Error = ParseOtpStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(ParseOtpStatusError(value.to_owned())),
        }
    }
}

/// OTP aggregate root.
///
/// Created as `Pending`/active; either verified once (`Success`,
/// inactive) or expired when a newer code is issued (`Expired`,
/// inactive). Inactive records never verify again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Otp {
    id: OtpId,
    phone_number: PhoneNumber,
    code: OtpCode,
    status: OtpStatus,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted OTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOtpData {
    /// Persisted OTP identifier.
    pub id: OtpId,
    /// Phone number the code was issued for.
    pub phone_number: PhoneNumber,
    /// The issued code.
    pub code: OtpCode,
    /// Persisted issuance state.
    pub status: OtpStatus,
    /// Persisted active flag.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Otp {
    /// Issues a new pending OTP for a phone number.
    #[must_use]
    pub fn new(phone_number: PhoneNumber, code: OtpCode, clock: &impl Clock) -> Self {
        Self {
            id: OtpId::new(),
            phone_number,
            code,
            status: OtpStatus::Pending,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an OTP from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOtpData) -> Self {
        Self {
            id: data.id,
            phone_number: data.phone_number,
            code: data.code,
            status: data.status,
            active: data.active,
            created_at: data.created_at,
        }
    }

    /// Returns the OTP identifier.
    #[must_use]
    pub const fn id(&self) -> OtpId {
        self.id
    }

    /// Returns the phone number the code was issued for.
    #[must_use]
    pub const fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// Returns the issued code.
    #[must_use]
    pub const fn code(&self) -> &OtpCode {
        &self.code
    }

    /// Returns the issuance state.
    #[must_use]
    pub const fn status(&self) -> OtpStatus {
        self.status
    }

    /// Returns whether the code can still verify.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Retires the code because a newer one was issued.
    pub const fn mark_expired(&mut self) {
        self.status = OtpStatus::Expired;
        self.active = false;
    }

    /// Consumes the code after a successful verification.
    pub const fn mark_verified(&mut self) {
        self.status = OtpStatus::Success;
        self.active = false;
    }
}

//! Reset-token aggregate, raw-token generation, and storage digest.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

use super::PasswordResetDomainError;
use crate::account::domain::AccountId;

/// Bytes of entropy fed into raw-token derivation.
const TOKEN_ENTROPY_BYTES: usize = 60;

/// Unique identifier for a reset-token record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordResetTokenId(Uuid);

impl PasswordResetTokenId {
    /// Creates a new random token identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a token identifier from an existing UUID.
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

impl Default for PasswordResetTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PasswordResetTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// High-entropy raw token handed to the account owner.
///
/// Derived as the hex SHA-256 digest of fresh OS randomness; only the
/// argon2 digest of this value is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResetToken(String);

impl RawResetToken {
    /// Generates a fresh raw token.
    #[must_use]
    pub fn generate() -> Self {
        let mut entropy = [0u8; TOKEN_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);
        let digest = Sha256::digest(entropy);
        let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        Self(hex)
    }

    /// Returns the raw token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Argon2id digest of a raw reset token in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResetTokenDigest(String);

impl ResetTokenDigest {
    /// Hashes a raw token with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordResetDomainError::TokenHashing`] when the
    /// hasher rejects its inputs.
    pub fn hash(raw_token: &RawResetToken) -> Result<Self, PasswordResetDomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(raw_token.as_str().as_bytes(), &salt)
            .map_err(|err| PasswordResetDomainError::TokenHashing(err.to_string()))?;
        Ok(Self(digest.to_string()))
    }

    /// Reconstructs a digest from its persisted PHC string.
    #[must_use]
    pub const fn from_phc_string(value: String) -> Self {
        Self(value)
    }

    /// Returns whether the presented raw token matches this digest.
    #[must_use]
    pub fn matches(&self, presented: &str) -> bool {
        PhcString::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(presented.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the PHC-formatted digest string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reset-token aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    id: PasswordResetTokenId,
    account_id: AccountId,
    digest: ResetTokenDigest,
    expires_at: DateTime<Utc>,
    is_used: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted reset token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedResetTokenData {
    /// Persisted token identifier.
    pub id: PasswordResetTokenId,
    /// Owning account.
    pub account_id: AccountId,
    /// Persisted storage digest.
    pub digest: ResetTokenDigest,
    /// Persisted absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Persisted single-use flag.
    pub is_used: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Creates a new unused token record.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        digest: ResetTokenDigest,
        expires_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PasswordResetTokenId::new(),
            account_id,
            digest,
            expires_at,
            is_used: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a token from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResetTokenData) -> Self {
        Self {
            id: data.id,
            account_id: data.account_id,
            digest: data.digest,
            expires_at: data.expires_at,
            is_used: data.is_used,
            created_at: data.created_at,
        }
    }

    /// Returns the token identifier.
    #[must_use]
    pub const fn id(&self) -> PasswordResetTokenId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the storage digest.
    #[must_use]
    pub const fn digest(&self) -> &ResetTokenDigest {
        &self.digest
    }

    /// Returns the absolute expiry.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the token was already consumed.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.is_used
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the token is past its expiry at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Consumes the token after a completed password change.
    pub const fn mark_used(&mut self) {
        self.is_used = true;
    }
}

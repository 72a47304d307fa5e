//! Argon2id password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};

use super::AccountDomainError;

/// Argon2id digest of an account password in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hashes a cleartext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::PasswordHashing`] when the hasher
    /// rejects its inputs.
    pub fn hash(password: &str) -> Result<Self, AccountDomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| AccountDomainError::PasswordHashing(err.to_string()))?;
        Ok(Self(digest.to_string()))
    }

    /// Reconstructs a digest from its persisted PHC string.
    #[must_use]
    pub const fn from_phc_string(value: String) -> Self {
        Self(value)
    }

    /// Returns whether the cleartext password matches this digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        PhcString::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// Returns the PHC-formatted digest string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

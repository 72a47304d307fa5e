//! HS256 issuance and verification.

use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use mockable::Clock;
use std::sync::Arc;

use super::{AccessToken, AccessTokenClaims, AccessTokenError};
use crate::account::domain::AccountId;
use crate::config::AccountSettings;

/// Stateless access-token issuer.
///
/// Holds the signing key and expiry window from configuration; minting
/// uses the injected clock, verification checks signature and expiry
/// with zero leeway.
#[derive(Clone)]
pub struct AccessTokenIssuer<C>
where
    C: Clock + Send + Sync,
{
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_days: i64,
    clock: Arc<C>,
}

impl<C> AccessTokenIssuer<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an issuer from account settings.
    #[must_use]
    pub fn new(settings: &AccountSettings, clock: Arc<C>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.token_signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.token_signing_key.as_bytes()),
            expiry_days: settings.token_expiry_days,
            clock,
        }
    }

    /// Issues a signed token for an account.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::Encoding`] when serialization fails.
    pub fn issue(&self, account_id: AccountId) -> Result<AccessToken, AccessTokenError> {
        let expires_at = self.clock.utc() + Duration::days(self.expiry_days);
        let claims = AccessTokenClaims {
            account_id,
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| AccessTokenError::Encoding(err.to_string()))?;
        Ok(AccessToken {
            token,
            account_id,
            expires_at,
        })
    }

    /// Verifies signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::Expired`] for an out-of-date token
    /// and [`AccessTokenError::Invalid`] for anything malformed or
    /// tampered.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AccessTokenError::Expired,
                _ => AccessTokenError::Invalid,
            })
    }
}

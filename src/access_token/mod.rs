//! Stateless access-token issuance and verification.
//!
//! Tokens are HS256 JWTs embedding the account identifier and an
//! absolute expiry; there is no revocation list, so expiry is the only
//! lifetime bound. Bearer-header parsing lives here too so embedding
//! HTTP layers share one taxonomy of authentication failures.

mod domain;
mod error;
mod issuer;

pub use domain::{AccessToken, AccessTokenClaims, BearerToken};
pub use error::AccessTokenError;
pub use issuer::AccessTokenIssuer;

#[cfg(test)]
mod tests;

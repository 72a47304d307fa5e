//! Domain types for password-reset tokens.

mod error;
mod token;

pub use error::PasswordResetDomainError;
pub use token::{
    PasswordResetToken, PasswordResetTokenId, PersistedResetTokenData, RawResetToken,
    ResetTokenDigest,
};

//! Domain types for one-time passwords.

mod code;
mod error;
mod otp;

pub use code::OtpCode;
pub use error::{OtpDomainError, ParseOtpStatusError};
pub use otp::{Otp, OtpId, OtpStatus, PersistedOtpData};

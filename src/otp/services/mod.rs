//! Orchestration services for OTP issuance and verification.

mod issuance;

pub use issuance::{OtpService, OtpServiceError, OtpServiceResult};

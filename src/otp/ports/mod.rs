//! Port contracts for OTP persistence.

mod repository;

pub use repository::{OtpRepository, OtpRepositoryError, OtpRepositoryResult};

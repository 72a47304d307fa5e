//! `PostgreSQL` adapter for OTP persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{OtpPgPool, PostgresOtpRepository};

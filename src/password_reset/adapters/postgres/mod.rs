//! `PostgreSQL` adapter for reset-token persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresResetTokenRepository, ResetTokenPgPool};

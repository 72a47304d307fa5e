//! `PostgreSQL` adapter for account persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{AccountPgPool, PostgresAccountRepository};

//! `PostgreSQL` adapter for notification-preferences persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresPreferencesRepository, PreferencesPgPool};

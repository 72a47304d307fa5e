//! `PostgreSQL` adapter for task and comment persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresCommentRepository, PostgresTaskRepository, TaskPgPool};

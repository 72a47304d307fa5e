//! Diesel model types for task and comment persistence.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{comments, tasks};

/// Database row representation of a task.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: Uuid,
    /// Owning account identifier.
    pub account_id: Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task column set.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChanges {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Database row representation of a comment.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Internal comment identifier.
    pub id: Uuid,
    /// The commented task.
    pub task_id: Uuid,
    /// The author's account identifier.
    pub account_id: Uuid,
    /// Comment content.
    pub content: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable comment column set.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = comments)]
pub struct CommentChanges {
    /// Comment content.
    pub content: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

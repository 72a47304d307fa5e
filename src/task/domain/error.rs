//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// The pagination request is out of range.
    #[error("invalid pagination: page and size must both be at least 1")]
    InvalidPagination,
}

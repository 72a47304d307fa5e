//! Repository port for comment persistence, lookup, and listing.

use crate::task::domain::{Comment, CommentId, PageRequest, SortParams, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract; lookups are task-scoped and
/// active-only.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::DuplicateComment`] when the ID
    /// exists.
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Persists changes to an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the comment
    /// does not exist.
    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Finds an active comment by task and identifier.
    async fn find_active(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> CommentRepositoryResult<Option<Comment>>;

    /// Counts active comments on a task.
    async fn count_active_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<u64>;

    /// Returns one page of a task's active comments.
    ///
    /// Without explicit sort parameters the listing is creation time
    /// descending with the identifier as tie-break.
    async fn list_active_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> CommentRepositoryResult<Vec<Comment>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The comment was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

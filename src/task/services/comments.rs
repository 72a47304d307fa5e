//! Service layer for task-scoped, author-checked comment CRUD.

use crate::account::domain::AccountId;
use crate::error::ErrorCode;
use crate::task::{
    domain::{
        Comment, CommentContent, CommentId, Page, PageRequest, SortParams, TaskDomainError, TaskId,
    },
    ports::{CommentRepository, CommentRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Receipt returned after a successful soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentDeletionReceipt {
    /// The deleted comment.
    pub comment_id: CommentId,
    /// When the soft delete was stamped.
    pub deleted_at: DateTime<Utc>,
}

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// No active comment matches; author mismatches on mutation
    /// deliberately read as not-found too.
    #[error("comment not found: {0}")]
    NotFound(CommentId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
}

impl ErrorCode for CommentServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "TASK_ERR_03",
            Self::Domain(_) => "TASK_ERR_04",
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Domain(_) => 400,
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment CRUD orchestration service.
#[derive(Clone)]
pub struct CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a comment by an author on a task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Domain`] when the content is
    /// empty or a repository error.
    pub async fn create(
        &self,
        task_id: TaskId,
        account_id: AccountId,
        content: &str,
    ) -> CommentServiceResult<Comment> {
        let content = CommentContent::new(content)?;
        let comment = Comment::new(task_id, account_id, content, &*self.clock);
        self.repository.insert(&comment).await?;
        Ok(comment)
    }

    /// Returns an active comment on a task; read access is task-scoped
    /// and does not require authorship.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when absent,
    /// soft-deleted, or on another task.
    pub async fn get(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> CommentServiceResult<Comment> {
        self.repository
            .find_active(task_id, comment_id)
            .await?
            .ok_or(CommentServiceError::NotFound(comment_id))
    }

    /// Returns one page of a task's active comments with totals.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Repository`] when persistence
    /// fails.
    pub async fn list(
        &self,
        task_id: TaskId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> CommentServiceResult<Page<Comment>> {
        let total_count = self.repository.count_active_by_task(task_id).await?;
        let items = self
            .repository
            .list_active_by_task(task_id, page, sort)
            .await?;
        Ok(Page::assemble(items, page, total_count))
    }

    /// Replaces a comment's content; only the author may update.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] for absent comments
    /// AND for author mismatches (no existence leak), or a
    /// validation/repository error.
    pub async fn update(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
        account_id: AccountId,
        content: &str,
    ) -> CommentServiceResult<Comment> {
        let content = CommentContent::new(content)?;
        let mut comment = self.get_owned(task_id, comment_id, account_id).await?;
        comment.update_content(content, &*self.clock);
        self.repository.update(&comment).await?;
        Ok(comment)
    }

    /// Soft-deletes a comment; only the author may delete.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] for absent comments
    /// and author mismatches alike.
    pub async fn delete(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
        account_id: AccountId,
    ) -> CommentServiceResult<CommentDeletionReceipt> {
        let mut comment = self.get_owned(task_id, comment_id, account_id).await?;
        comment.deactivate(&*self.clock);
        self.repository.update(&comment).await?;
        Ok(CommentDeletionReceipt {
            comment_id,
            deleted_at: comment.updated_at(),
        })
    }

    async fn get_owned(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
        account_id: AccountId,
    ) -> CommentServiceResult<Comment> {
        let comment = self.get(task_id, comment_id).await?;
        if comment.account_id() != account_id {
            return Err(CommentServiceError::NotFound(comment_id));
        }
        Ok(comment)
    }
}

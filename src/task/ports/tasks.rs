//! Repository port for task persistence, lookup, and listing.

use crate::account::domain::AccountId;
use crate::task::domain::{PageRequest, SortParams, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract; lookups are account-scoped and
/// active-only.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the ID
    /// exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds an active task by owner and identifier.
    async fn find_active(
        &self,
        account_id: AccountId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Counts active tasks owned by an account.
    async fn count_active_by_account(&self, account_id: AccountId) -> TaskRepositoryResult<u64>;

    /// Returns one page of an account's active tasks.
    ///
    /// Without explicit sort parameters the listing is creation time
    /// descending with the identifier as tie-break.
    async fn list_active_by_account(
        &self,
        account_id: AccountId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for account-scoped task CRUD.

use crate::account::domain::AccountId;
use crate::error::ErrorCode;
use crate::task::{
    domain::{Page, PageRequest, SortParams, Task, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Receipt returned after a successful soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDeletionReceipt {
    /// The deleted task.
    pub task_id: TaskId,
    /// When the soft delete was stamped.
    pub deleted_at: DateTime<Utc>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No active task with this identifier belongs to the account.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl ErrorCode for TaskServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "TASK_ERR_01",
            Self::Domain(_) => "TASK_ERR_02",
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

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task CRUD orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task for an account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is empty or
    /// a repository error.
    pub async fn create(
        &self,
        account_id: AccountId,
        title: &str,
        description: &str,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(title)?;
        let task = Task::new(account_id, title, description, &*self.clock);
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Returns an account's active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent,
    /// soft-deleted, or owned by another account.
    pub async fn get(&self, account_id: AccountId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_active(account_id, task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    /// Returns one page of an account's active tasks with totals.
    ///
    /// An out-of-range page yields an empty item list with the totals
    /// still accurate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence fails.
    pub async fn list(
        &self,
        account_id: AccountId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> TaskServiceResult<Page<Task>> {
        let total_count = self.repository.count_active_by_account(account_id).await?;
        let items = self
            .repository
            .list_active_by_account(account_id, page, sort)
            .await?;
        Ok(Page::assemble(items, page, total_count))
    }

    /// Replaces a task's title and description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent
    /// or foreign, or a validation/repository error.
    pub async fn update(
        &self,
        account_id: AccountId,
        task_id: TaskId,
        title: &str,
        description: &str,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(title)?;
        let mut task = self.get(account_id, task_id).await?;
        task.update_details(title, description, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent
    /// or foreign.
    pub async fn delete(
        &self,
        account_id: AccountId,
        task_id: TaskId,
    ) -> TaskServiceResult<TaskDeletionReceipt> {
        let mut task = self.get(account_id, task_id).await?;
        task.deactivate(&*self.clock);
        self.repository.update(&task).await?;
        Ok(TaskDeletionReceipt {
            task_id,
            deleted_at: task.updated_at(),
        })
    }
}

//! In-memory task and comment repositories for tests and local
//! composition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::account::domain::AccountId;
use crate::task::{
    domain::{
        Comment, CommentId, PageRequest, SortDirection, SortField, SortParams, Task, TaskId,
    },
    ports::{
        CommentRepository, CommentRepositoryError, CommentRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Sort key extracted from a record for in-memory ordering.
struct SortKey {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    id: Uuid,
}

/// Orders two keys per the optional explicit sort, defaulting to
/// creation time descending with the identifier as tie-break.
fn compare(a: &SortKey, b: &SortKey, sort: Option<SortParams>) -> Ordering {
    let (field, direction) = sort.map_or(
        (SortField::CreatedAt, SortDirection::Descending),
        |params| (params.field, params.direction),
    );
    let by_field = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    let ordered = by_field.then_with(|| a.id.cmp(&b.id));
    match direction {
        SortDirection::Ascending => ordered,
        SortDirection::Descending => ordered.reverse(),
    }
}

/// Applies skip/take pagination to a sorted vector.
fn paginate<T>(records: Vec<T>, page: PageRequest) -> Vec<T> {
    let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.size()).unwrap_or(usize::MAX);
    records.into_iter().skip(skip).take(take).collect()
}

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn active_for_account(
        state: &HashMap<TaskId, Task>,
        account_id: AccountId,
    ) -> Vec<Task> {
        state
            .values()
            .filter(|task| task.is_active() && task.account_id() == account_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        account_id: AccountId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .get(&task_id)
            .filter(|task| task.is_active() && task.account_id() == account_id)
            .cloned())
    }

    async fn count_active_by_account(&self, account_id: AccountId) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(u64::try_from(Self::active_for_account(&state, account_id).len()).unwrap_or(u64::MAX))
    }

    async fn list_active_by_account(
        &self,
        account_id: AccountId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks = Self::active_for_account(&state, account_id);
        tasks.sort_by(|a, b| {
            compare(
                &SortKey {
                    created_at: a.created_at(),
                    updated_at: a.updated_at(),
                    id: a.id().into_inner(),
                },
                &SortKey {
                    created_at: b.created_at(),
                    updated_at: b.updated_at(),
                    id: b.id().into_inner(),
                },
                sort,
            )
        });
        Ok(paginate(tasks, page))
    }
}

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<HashMap<CommentId, Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn active_for_task(state: &HashMap<CommentId, Comment>, task_id: TaskId) -> Vec<Comment> {
        state
            .values()
            .filter(|comment| comment.is_active() && comment.task_id() == task_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        state.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&comment.id()) {
            return Err(CommentRepositoryError::NotFound(comment.id()));
        }
        state.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> CommentRepositoryResult<Option<Comment>> {
        let state = self.state.read().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .get(&comment_id)
            .filter(|comment| comment.is_active() && comment.task_id() == task_id)
            .cloned())
    }

    async fn count_active_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(u64::try_from(Self::active_for_task(&state, task_id).len()).unwrap_or(u64::MAX))
    }

    async fn list_active_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(|err| {
            CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut comments = Self::active_for_task(&state, task_id);
        comments.sort_by(|a, b| {
            compare(
                &SortKey {
                    created_at: a.created_at(),
                    updated_at: a.updated_at(),
                    id: a.id().into_inner(),
                },
                &SortKey {
                    created_at: b.created_at(),
                    updated_at: b.updated_at(),
                    id: b.id().into_inner(),
                },
                sort,
            )
        });
        Ok(paginate(comments, page))
    }
}

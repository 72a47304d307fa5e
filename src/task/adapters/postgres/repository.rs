//! `PostgreSQL` repository implementations for task and comment
//! storage.

use super::{
    models::{CommentChanges, CommentRow, TaskChanges, TaskRow},
    schema::{comments, tasks},
};
use crate::account::domain::AccountId;
use crate::task::{
    domain::{
        Comment, CommentContent, CommentId, PageRequest, PersistedCommentData, PersistedTaskData,
        SortDirection, SortField, SortParams, Task, TaskId, TaskTitle,
    },
    ports::{
        CommentRepository, CommentRepositoryError, CommentRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

fn page_limits(page: PageRequest) -> (i64, i64) {
    let skip = i64::try_from(page.skip()).unwrap_or(i64::MAX);
    let limit = i64::from(page.size());
    (skip, limit)
}

fn effective_sort(sort: Option<SortParams>) -> (SortField, SortDirection) {
    sort.map_or((SortField::CreatedAt, SortDirection::Descending), |params| {
        (params.field, params.direction)
    })
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = TaskChanges {
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            active: task.is_active(),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set(&changes)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_active(
        &self,
        account_id: AccountId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .filter(tasks::account_id.eq(account_id.into_inner()))
                .filter(tasks::active.eq(true))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn count_active_by_account(&self, account_id: AccountId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::account_id.eq(account_id.into_inner()))
                .filter(tasks::active.eq(true))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn list_active_by_account(
        &self,
        account_id: AccountId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let (skip, limit) = page_limits(page);
        let (field, direction) = effective_sort(sort);

        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::account_id.eq(account_id.into_inner()))
                .filter(tasks::active.eq(true))
                .select(TaskRow::as_select())
                .into_boxed();

            query = match (field, direction) {
                (SortField::CreatedAt, SortDirection::Ascending) => {
                    query.order((tasks::created_at.asc(), tasks::id.asc()))
                }
                (SortField::CreatedAt, SortDirection::Descending) => {
                    query.order((tasks::created_at.desc(), tasks::id.desc()))
                }
                (SortField::UpdatedAt, SortDirection::Ascending) => {
                    query.order((tasks::updated_at.asc(), tasks::id.asc()))
                }
                (SortField::UpdatedAt, SortDirection::Descending) => {
                    query.order((tasks::updated_at.desc(), tasks::id.desc()))
                }
            };

            let rows = query
                .offset(skip)
                .limit(limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        account_id: task.account_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        active: task.is_active(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        account_id: AccountId::from_uuid(row.account_id),
        title,
        description: row.description,
        active: row.active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: TaskPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let row = comment_to_row(comment);

        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => CommentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let changes = CommentChanges {
            content: comment.content().as_str().to_owned(),
            active: comment.is_active(),
            updated_at: comment.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(comments::table.filter(comments::id.eq(comment_id.into_inner())))
                    .set(&changes)
                    .execute(connection)
                    .map_err(CommentRepositoryError::persistence)?;
            if affected == 0 {
                return Err(CommentRepositoryError::NotFound(comment_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_active(
        &self,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> CommentRepositoryResult<Option<Comment>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(comment_id.into_inner()))
                .filter(comments::task_id.eq(task_id.into_inner()))
                .filter(comments::active.eq(true))
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?;
            row.map(row_to_comment).transpose()
        })
        .await
    }

    async fn count_active_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .filter(comments::active.eq(true))
                .count()
                .get_result(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn list_active_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
        sort: Option<SortParams>,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        let (skip, limit) = page_limits(page);
        let (field, direction) = effective_sort(sort);

        self.run_blocking(move |connection| {
            let mut query = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .filter(comments::active.eq(true))
                .select(CommentRow::as_select())
                .into_boxed();

            query = match (field, direction) {
                (SortField::CreatedAt, SortDirection::Ascending) => {
                    query.order((comments::created_at.asc(), comments::id.asc()))
                }
                (SortField::CreatedAt, SortDirection::Descending) => {
                    query.order((comments::created_at.desc(), comments::id.desc()))
                }
                (SortField::UpdatedAt, SortDirection::Ascending) => {
                    query.order((comments::updated_at.asc(), comments::id.asc()))
                }
                (SortField::UpdatedAt, SortDirection::Descending) => {
                    query.order((comments::updated_at.desc(), comments::id.desc()))
                }
            };

            let rows = query
                .offset(skip)
                .limit(limit)
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn comment_to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        account_id: comment.account_id().into_inner(),
        content: comment.content().as_str().to_owned(),
        active: comment.is_active(),
        created_at: comment.created_at(),
        updated_at: comment.updated_at(),
    }
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let content = CommentContent::new(row.content).map_err(CommentRepositoryError::persistence)?;
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        account_id: AccountId::from_uuid(row.account_id),
        content,
        active: row.active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

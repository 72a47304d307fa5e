//! Client port to the external durable-execution backend.
//!
//! The backend owns run state, retry of its own connections, and all
//! durability; this crate only issues commands and reads snapshots.

use crate::orchestration::domain::{CronSpec, RunId, WorkerName, WorkerRun};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Parameters of a start command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRunRequest {
    /// Idempotency key for the run.
    pub run_id: RunId,
    /// Worker class to execute.
    pub worker_type: WorkerName,
    /// Queue to dispatch on.
    pub task_queue: String,
    /// Arguments handed to the worker.
    pub arguments: Vec<Value>,
    /// Recurring schedule; `None` for a one-shot run.
    pub cron_schedule: Option<CronSpec>,
}

impl StartRunRequest {
    /// Creates a one-shot start request without arguments.
    #[must_use]
    pub fn new(run_id: RunId, worker_type: WorkerName, task_queue: impl Into<String>) -> Self {
        Self {
            run_id,
            worker_type,
            task_queue: task_queue.into(),
            arguments: Vec::new(),
            cron_schedule: None,
        }
    }

    /// Sets the worker arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Makes the request a recurring cron schedule.
    #[must_use]
    pub fn with_cron_schedule(mut self, cron_schedule: CronSpec) -> Self {
        self.cron_schedule = Some(cron_schedule);
        self
    }
}

/// Outcome of a start command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartRunOutcome {
    /// A new run was accepted under the given id.
    Started(RunId),
    /// A run with this id is already live; nothing new was started.
    AlreadyRunning(RunId),
}

/// Errors surfaced by backend implementations.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// No run exists for the given handle.
    #[error("no run found for handle {0}")]
    RunNotFound(RunId),

    /// The backend server could not be reached; fatal at startup. The
    /// client performs its own configured connection retries before
    /// this surfaces.
    #[error("unable to reach durable-execution server at {address}")]
    Connection {
        /// The unreachable server address, kept for diagnostics.
        address: String,
    },

    /// Any other transport or server failure.
    #[error("backend rpc failure: {0}")]
    Rpc(Arc<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// Wraps a transport failure.
    pub fn rpc(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Rpc(Arc::new(err))
    }
}

/// Durable-execution backend contract.
#[async_trait]
pub trait DurableBackend: Send + Sync {
    /// Submits a run (one-shot or cron) for execution.
    ///
    /// Starting an id that is already live is not an error; it reports
    /// [`StartRunOutcome::AlreadyRunning`] so recurring schedules stay
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on connection or transport failure.
    async fn start_run(&self, request: StartRunRequest) -> BackendResult<StartRunOutcome>;

    /// Returns the current snapshot of a run.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::RunNotFound`] for unknown handles.
    async fn describe_run(&self, run_id: &RunId) -> BackendResult<WorkerRun>;

    /// Requests cooperative cancellation of a run.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::RunNotFound`] for unknown handles.
    async fn request_cancel(&self, run_id: &RunId) -> BackendResult<()>;

    /// Forcibly terminates a run.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::RunNotFound`] for unknown handles.
    async fn terminate_run(&self, run_id: &RunId) -> BackendResult<()>;
}

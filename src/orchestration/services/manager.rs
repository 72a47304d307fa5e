//! The typed, idempotent control surface over the backend.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::error::ErrorCode;
use crate::orchestration::domain::{CronSpec, RunId, RunStatus, WorkerName, WorkerRun};
use crate::orchestration::ports::{
    BackendError, DurableBackend, StartRunOutcome, StartRunRequest,
};
use crate::orchestration::registry::{RegisteredWorker, WorkerRegistry};

/// Service-level errors for orchestration operations.
///
/// Every backend failure maps to one of these named kinds; raw backend
/// errors never escape the manager.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    /// No running durable-execution server at the configured address.
    #[error(
        "unable to find a running durable-execution server at {address}; \
         make sure it is up and restart the service"
    )]
    ClientConnection {
        /// The unreachable server address.
        address: String,
    },

    /// The worker class was never registered at startup.
    #[error("worker class {0} is not registered; add it to the startup worker registry")]
    NotRegistered(WorkerName),

    /// No run exists for the given id.
    #[error("worker run {0} not found; verify the id and try again")]
    RunNotFound(RunId),

    /// The backend rejected or failed the start command.
    #[error("could not start worker {0}; check the execution-server logs")]
    StartFailed(WorkerName),

    /// The run already finished successfully.
    #[error("worker run {0} has already completed")]
    AlreadyCompleted(RunId),

    /// The run was already cancelled.
    #[error("worker run {0} has already been cancelled")]
    AlreadyCancelled(RunId),

    /// The run was already terminated.
    #[error("worker run {0} has already been terminated")]
    AlreadyTerminated(RunId),
}

impl ErrorCode for OrchestrationError {
    fn code(&self) -> &'static str {
        match self {
            Self::ClientConnection { .. } => "WORKER_ERR_01",
            Self::NotRegistered(_) => "WORKER_ERR_02",
            Self::RunNotFound(_) => "WORKER_ERR_03",
            Self::StartFailed(_) => "WORKER_ERR_04",
            Self::AlreadyCompleted(_) => "WORKER_ERR_05",
            Self::AlreadyCancelled(_) => "WORKER_ERR_06",
            Self::AlreadyTerminated(_) => "WORKER_ERR_07",
        }
    }

    fn http_status(&self) -> u16 {
        match self {
            Self::ClientConnection { .. } | Self::StartFailed(_) => 500,
            Self::NotRegistered(_)
            | Self::AlreadyCompleted(_)
            | Self::AlreadyCancelled(_)
            | Self::AlreadyTerminated(_) => 400,
            Self::RunNotFound(_) => 404,
        }
    }
}

/// Result type for orchestration operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// Typed control surface over a connected durable-execution backend.
///
/// Constructed at startup with an already-connected backend client and
/// the worker registry; the manager itself holds no mutable state.
#[derive(Clone)]
pub struct WorkerManager<B>
where
    B: DurableBackend,
{
    backend: Arc<B>,
    registry: Arc<WorkerRegistry>,
}

impl<B> WorkerManager<B>
where
    B: DurableBackend,
{
    /// Creates a manager over a connected backend and registry.
    #[must_use]
    pub const fn new(backend: Arc<B>, registry: Arc<WorkerRegistry>) -> Self {
        Self { backend, registry }
    }

    /// Starts an ad-hoc run of a registered worker class.
    ///
    /// Each call mints a fresh run id, so repeated calls start
    /// independent runs.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::NotRegistered`] for unknown
    /// classes, [`OrchestrationError::ClientConnection`] when the
    /// server is unreachable, and [`OrchestrationError::StartFailed`]
    /// for any other submission failure.
    pub async fn run_immediately(
        &self,
        name: &WorkerName,
        arguments: Vec<Value>,
    ) -> OrchestrationResult<RunId> {
        let entry = self.registered(name)?;
        let run_id = RunId::ad_hoc(name);
        let request = StartRunRequest::new(
            run_id,
            name.clone(),
            entry.priority().queue_name(),
        )
        .with_arguments(arguments);

        self.submit(name, request).await
    }

    /// Schedules a worker class on a recurring cron expression.
    ///
    /// The run id is the fixed `{Name}-cron`, making the operation
    /// idempotent: if the schedule already exists the backend signals
    /// "already started" and the existing id is returned without
    /// creating a second schedule.
    ///
    /// # Errors
    ///
    /// Returns the same kinds as [`WorkerManager::run_immediately`].
    pub async fn schedule_as_cron(
        &self,
        name: &WorkerName,
        cron_schedule: CronSpec,
    ) -> OrchestrationResult<RunId> {
        let entry = self.registered(name)?;
        let run_id = RunId::cron(name);
        let request = StartRunRequest::new(
            run_id,
            name.clone(),
            entry.priority().queue_name(),
        )
        .with_cron_schedule(cron_schedule);

        self.submit(name, request).await
    }

    /// Returns the backend's current snapshot of a run.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::RunNotFound`] when the backend has
    /// no such handle, or [`OrchestrationError::ClientConnection`] when
    /// the server is unreachable.
    pub async fn status(&self, run_id: &RunId) -> OrchestrationResult<WorkerRun> {
        self.backend
            .describe_run(run_id)
            .await
            .map_err(|err| map_lookup_error(err, run_id))
    }

    /// Cooperatively cancels a running worker.
    ///
    /// The current status is fetched first so an already-terminal run
    /// yields its matching named error instead of an opaque backend
    /// rejection.
    ///
    /// # Errors
    ///
    /// Returns the matching `Already*` kind for terminal runs, or
    /// lookup errors as in [`WorkerManager::status`].
    pub async fn cancel(&self, run_id: &RunId) -> OrchestrationResult<()> {
        let run = self.status(run_id).await?;
        ensure_not_terminal(&run)?;
        self.backend
            .request_cancel(run_id)
            .await
            .map_err(|err| map_lookup_error(err, run_id))
    }

    /// Forcibly terminates a running worker.
    ///
    /// # Errors
    ///
    /// Returns the matching `Already*` kind for terminal runs, or
    /// lookup errors as in [`WorkerManager::status`].
    pub async fn terminate(&self, run_id: &RunId) -> OrchestrationResult<()> {
        let run = self.status(run_id).await?;
        ensure_not_terminal(&run)?;
        self.backend
            .terminate_run(run_id)
            .await
            .map_err(|err| map_lookup_error(err, run_id))
    }

    fn registered(&self, name: &WorkerName) -> OrchestrationResult<&RegisteredWorker> {
        self.registry
            .get(name)
            .ok_or_else(|| OrchestrationError::NotRegistered(name.clone()))
    }

    async fn submit(
        &self,
        name: &WorkerName,
        request: StartRunRequest,
    ) -> OrchestrationResult<RunId> {
        match self.backend.start_run(request).await {
            Ok(StartRunOutcome::Started(run_id)) => Ok(run_id),
            Ok(StartRunOutcome::AlreadyRunning(run_id)) => {
                tracing::info!(
                    worker = %name,
                    run_id = %run_id,
                    "run already live, skipping new start"
                );
                Ok(run_id)
            }
            Err(BackendError::Connection { address }) => {
                Err(OrchestrationError::ClientConnection { address })
            }
            Err(_) => Err(OrchestrationError::StartFailed(name.clone())),
        }
    }
}

/// Rejects cancel/terminate against terminal runs with the error kind
/// matching the run's actual state.
fn ensure_not_terminal(run: &WorkerRun) -> OrchestrationResult<()> {
    match run.status {
        RunStatus::Completed | RunStatus::Failed | RunStatus::TimedOut => {
            Err(OrchestrationError::AlreadyCompleted(run.id.clone()))
        }
        RunStatus::Canceled => Err(OrchestrationError::AlreadyCancelled(run.id.clone())),
        RunStatus::Terminated => Err(OrchestrationError::AlreadyTerminated(run.id.clone())),
        RunStatus::Running => Ok(()),
    }
}

fn map_lookup_error(err: BackendError, run_id: &RunId) -> OrchestrationError {
    match err {
        BackendError::Connection { address } => OrchestrationError::ClientConnection { address },
        BackendError::RunNotFound(_) | BackendError::Rpc(_) => {
            OrchestrationError::RunNotFound(run_id.clone())
        }
    }
}

//! In-process stand-in for the durable-execution backend.
//!
//! Tracks run state with the same contracts as the real engine:
//! idempotent starts against live handles, terminal transitions with
//! close timestamps, and snapshot describes. With a registry attached
//! it also executes one-shot runs inline through the run executor, so
//! callers observe real `Completed`/`Failed` transitions.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::orchestration::domain::{RunId, RunStatus, WorkerRun};
use crate::orchestration::ports::{
    BackendError, BackendResult, DurableBackend, StartRunOutcome, StartRunRequest,
};
use crate::orchestration::registry::WorkerRegistry;
use crate::orchestration::services::RunExecutor;

#[derive(Debug, Clone)]
struct StoredRun {
    run: WorkerRun,
    is_cron: bool,
}

/// Thread-safe in-memory durable backend.
#[derive(Clone)]
pub struct InMemoryDurableBackend<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<HashMap<String, StoredRun>>>,
    registry: Option<Arc<WorkerRegistry>>,
    clock: Arc<C>,
}

impl<C> InMemoryDurableBackend<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a state-tracking backend; runs stay `Running` until a
    /// caller transitions them.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            registry: None,
            clock,
        }
    }

    /// Attaches a worker registry; one-shot starts then execute their
    /// worker inline and close the run before returning.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<WorkerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Forces a run into the given status (test hook standing in for
    /// engine-side transitions).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::RunNotFound`] for unknown handles.
    pub fn force_status(&self, run_id: &RunId, status: RunStatus) -> BackendResult<()> {
        self.transition(run_id, status)
    }

    /// Returns snapshots of every run the backend has accepted.
    #[must_use]
    pub fn runs(&self) -> Vec<WorkerRun> {
        self.state
            .read()
            .map(|state| state.values().map(|stored| stored.run.clone()).collect())
            .unwrap_or_default()
    }

    fn transition(&self, run_id: &RunId, status: RunStatus) -> BackendResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BackendError::rpc(std::io::Error::other(err.to_string())))?;
        let stored = state
            .get_mut(run_id.as_str())
            .ok_or_else(|| BackendError::RunNotFound(run_id.clone()))?;
        stored.run.status = status;
        if status.is_terminal() && stored.run.close_time.is_none() {
            stored.run.close_time = Some(self.clock.utc());
        }
        Ok(())
    }
}

#[async_trait]
impl<C> DurableBackend for InMemoryDurableBackend<C>
where
    C: Clock + Send + Sync,
{
    async fn start_run(&self, request: StartRunRequest) -> BackendResult<StartRunOutcome> {
        let is_cron = request.cron_schedule.is_some();
        {
            let mut state = self
                .state
                .write()
                .map_err(|err| BackendError::rpc(std::io::Error::other(err.to_string())))?;

            if let Some(existing) = state.get(request.run_id.as_str()) {
                // Live handles and cron schedules dedupe; a closed
                // one-shot id may be reused for a fresh execution.
                if existing.is_cron || !existing.run.status.is_terminal() {
                    return Ok(StartRunOutcome::AlreadyRunning(request.run_id));
                }
            }

            let run = WorkerRun {
                id: request.run_id.clone(),
                status: RunStatus::Running,
                start_time: self.clock.utc(),
                close_time: None,
                task_queue: request.task_queue.clone(),
                worker_type: request.worker_type.clone(),
            };
            state.insert(
                request.run_id.as_str().to_owned(),
                StoredRun { run, is_cron },
            );
        }

        if !is_cron
            && let Some(registry) = &self.registry
            && let Some(entry) = registry.get(&request.worker_type)
        {
            let outcome = RunExecutor::drive(entry.worker().as_ref(), &request.arguments).await;
            let status = match outcome {
                Ok(()) => RunStatus::Completed,
                Err(_) => RunStatus::Failed,
            };
            self.transition(&request.run_id, status)?;
        }

        Ok(StartRunOutcome::Started(request.run_id))
    }

    async fn describe_run(&self, run_id: &RunId) -> BackendResult<WorkerRun> {
        let state = self
            .state
            .read()
            .map_err(|err| BackendError::rpc(std::io::Error::other(err.to_string())))?;
        state
            .get(run_id.as_str())
            .map(|stored| stored.run.clone())
            .ok_or_else(|| BackendError::RunNotFound(run_id.clone()))
    }

    async fn request_cancel(&self, run_id: &RunId) -> BackendResult<()> {
        self.transition(run_id, RunStatus::Canceled)
    }

    async fn terminate_run(&self, run_id: &RunId) -> BackendResult<()> {
        self.transition(run_id, RunStatus::Terminated)
    }
}

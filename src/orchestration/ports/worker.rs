//! The worker contract implemented by background job classes.

use crate::orchestration::domain::{RetryPolicy, WorkerName, WorkerPriority};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure raised by a single execution attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("worker execution failed: {0}")]
pub struct WorkerExecutionError(pub String);

/// One unit of executable background logic.
///
/// Implementations supply only [`Worker::execute`]; the bounded
/// retry/timeout wiring lives in the run executor, so every worker
/// inherits it uniformly without subclassing.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Returns the registry identity of this worker class.
    fn name(&self) -> WorkerName;

    /// Returns the dispatch priority; defaults to the routine queue.
    fn priority(&self) -> WorkerPriority {
        WorkerPriority::Default
    }

    /// Returns the retry policy applied to each run.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }

    /// Executes one attempt of the worker's business logic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerExecutionError`] to signal a failed attempt; the
    /// executor decides whether another attempt follows.
    async fn execute(&self, arguments: &[Value]) -> Result<(), WorkerExecutionError>;
}

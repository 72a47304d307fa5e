//! Bounded retry/timeout driver for worker executions.
//!
//! Composition replaces the template-method pattern: a worker supplies
//! only `execute`, and this executor wraps it in the worker's own
//! retry policy, so every worker class inherits identical wiring.

use serde_json::Value;
use thiserror::Error;

use crate::orchestration::ports::Worker;

/// Failure after the retry policy is exhausted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("worker failed after {attempts} attempt(s): {last_error}")]
pub struct RunExecutionError {
    /// Attempts made before giving up.
    pub attempts: u32,
    /// Diagnostic from the final attempt (failure or timeout).
    pub last_error: String,
}

/// Drives a worker's `execute` under its retry policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunExecutor;

impl RunExecutor {
    /// Runs the worker to success or policy exhaustion.
    ///
    /// Each attempt is capped by the policy's `max_duration`; a timed
    /// out attempt counts as a failed one.
    ///
    /// # Errors
    ///
    /// Returns [`RunExecutionError`] when every attempt failed or timed
    /// out.
    pub async fn drive(
        worker: &dyn Worker,
        arguments: &[Value],
    ) -> Result<(), RunExecutionError> {
        let policy = worker.retry_policy();
        let mut last_error = String::new();

        for attempt in 1..=policy.max_attempts {
            match tokio::time::timeout(policy.max_duration, worker.execute(arguments)).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(err)) => {
                    tracing::warn!(
                        worker = %worker.name(),
                        attempt,
                        error = %err,
                        "worker attempt failed"
                    );
                    last_error = err.to_string();
                }
                Err(_) => {
                    tracing::warn!(
                        worker = %worker.name(),
                        attempt,
                        timeout = ?policy.max_duration,
                        "worker attempt timed out"
                    );
                    last_error = format!("attempt timed out after {:?}", policy.max_duration);
                }
            }
        }

        Err(RunExecutionError {
            attempts: policy.max_attempts,
            last_error,
        })
    }
}

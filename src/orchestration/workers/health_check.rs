//! Recurring backend health check.
//!
//! Scheduled as a cron run by the composition root at startup; probes
//! a liveness target and logs the outcome. A failed probe is reported
//! through logs, not through run failure, so the schedule keeps
//! firing regardless.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::orchestration::domain::{RetryPolicy, WorkerName};
use crate::orchestration::ports::{Worker, WorkerExecutionError};

/// Failure raised by a liveness probe.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("health probe failed: {0}")]
pub struct ProbeError(pub String);

/// Liveness target checked by the health worker.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Checks the target once.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the target is unhealthy.
    async fn check(&self) -> Result<(), ProbeError>;
}

/// Probe that always reports healthy, for tests and local runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysHealthy;

#[async_trait]
impl HealthProbe for AlwaysHealthy {
    async fn check(&self) -> Result<(), ProbeError> {
        Ok(())
    }
}

/// Worker that probes a liveness target and logs the result.
#[derive(Clone)]
pub struct HealthCheckWorker {
    probe: Arc<dyn HealthProbe>,
}

impl HealthCheckWorker {
    /// Per-attempt execution cap.
    const MAX_EXECUTION: Duration = Duration::from_secs(10);

    /// Creates a health-check worker over a probe.
    #[must_use]
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl Worker for HealthCheckWorker {
    fn name(&self) -> WorkerName {
        WorkerName::new("HealthCheckWorker")
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(1, Self::MAX_EXECUTION)
    }

    async fn execute(&self, _arguments: &[Value]) -> Result<(), WorkerExecutionError> {
        match self.probe.check().await {
            Ok(()) => tracing::info!("backend is healthy"),
            Err(err) => tracing::error!(error = %err, "backend is unhealthy"),
        }
        Ok(())
    }
}

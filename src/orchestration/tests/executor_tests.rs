//! Retry and timeout tests for the run executor.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::orchestration::domain::{RetryPolicy, WorkerName};
use crate::orchestration::ports::{Worker, WorkerExecutionError};
use crate::orchestration::services::RunExecutor;

/// Worker that fails a fixed number of times before succeeding.
struct FlakyWorker {
    failures_before_success: u32,
    attempts: Arc<AtomicU32>,
    policy: RetryPolicy,
}

#[async_trait]
impl Worker for FlakyWorker {
    fn name(&self) -> WorkerName {
        WorkerName::new("FlakyWorker")
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn execute(&self, _arguments: &[Value]) -> Result<(), WorkerExecutionError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures_before_success {
            return Err(WorkerExecutionError(format!("attempt {attempt} failed")));
        }
        Ok(())
    }
}

/// Worker that sleeps past its per-attempt cap.
struct SluggishWorker;

#[async_trait]
impl Worker for SluggishWorker {
    fn name(&self) -> WorkerName {
        WorkerName::new("SluggishWorker")
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(1, Duration::from_millis(50))
    }

    async fn execute(&self, _arguments: &[Value]) -> Result<(), WorkerExecutionError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn retries_until_success_within_policy() {
    let attempts = Arc::new(AtomicU32::new(0));
    let worker = FlakyWorker {
        failures_before_success: 2,
        attempts: Arc::clone(&attempts),
        policy: RetryPolicy::new(3, Duration::from_secs(5)),
    };

    RunExecutor::drive(&worker, &[])
        .await
        .expect("third attempt succeeds");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn exhausted_policy_reports_attempts_and_last_error() {
    let attempts = Arc::new(AtomicU32::new(0));
    let worker = FlakyWorker {
        failures_before_success: 10,
        attempts: Arc::clone(&attempts),
        policy: RetryPolicy::new(2, Duration::from_secs(5)),
    };

    let error = RunExecutor::drive(&worker, &[])
        .await
        .expect_err("policy exhausts");
    assert_eq!(error.attempts, 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(error.last_error.contains("attempt 2 failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_attempts_are_timed_out() {
    let error = RunExecutor::drive(&SluggishWorker, &[])
        .await
        .expect_err("attempt times out");
    assert_eq!(error.attempts, 1);
    assert!(error.last_error.contains("timed out"));
}

#[test]
fn zero_attempt_policies_clamp_to_one() {
    let policy = RetryPolicy::new(0, Duration::from_secs(1));
    assert_eq!(policy.max_attempts, 1);
}

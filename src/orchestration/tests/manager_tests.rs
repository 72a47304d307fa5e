//! Control-surface tests: idempotency, terminal-state guards, and
//! error mapping.

use mockable::DefaultClock;
use mockall::mock;
use rstest::{fixture, rstest};
use std::sync::Arc;

use crate::orchestration::{
    adapters::memory::InMemoryDurableBackend,
    domain::{CronSpec, RunId, RunStatus, WorkerName, WorkerPriority},
    ports::{
        BackendError, BackendResult, DurableBackend, StartRunOutcome, StartRunRequest,
    },
    registry::WorkerRegistry,
    services::{OrchestrationError, WorkerManager},
    workers::{AlwaysHealthy, HealthCheckWorker},
};

mock! {
    Backend {}

    #[async_trait::async_trait]
    impl DurableBackend for Backend {
        async fn start_run(&self, request: StartRunRequest) -> BackendResult<StartRunOutcome>;
        async fn describe_run(&self, run_id: &RunId) -> BackendResult<crate::orchestration::domain::WorkerRun>;
        async fn request_cancel(&self, run_id: &RunId) -> BackendResult<()>;
        async fn terminate_run(&self, run_id: &RunId) -> BackendResult<()>;
    }
}

type MemoryManager = WorkerManager<InMemoryDurableBackend<DefaultClock>>;

fn health_worker_name() -> WorkerName {
    WorkerName::new("HealthCheckWorker")
}

fn registry() -> Arc<WorkerRegistry> {
    Arc::new(
        WorkerRegistry::builder()
            .register(Arc::new(HealthCheckWorker::new(Arc::new(AlwaysHealthy))))
            .build(),
    )
}

struct Harness {
    manager: MemoryManager,
    backend: Arc<InMemoryDurableBackend<DefaultClock>>,
}

/// Harness whose backend only tracks state (no inline execution), so
/// started runs stay `Running` for cancellation tests.
#[fixture]
fn harness() -> Harness {
    let backend = Arc::new(InMemoryDurableBackend::new(Arc::new(DefaultClock)));
    Harness {
        manager: WorkerManager::new(Arc::clone(&backend), registry()),
        backend,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_class_is_rejected_before_dispatch(harness: Harness) {
    let result = harness
        .manager
        .run_immediately(&WorkerName::new("NotARealWorker"), Vec::new())
        .await;

    assert!(matches!(result, Err(OrchestrationError::NotRegistered(_))));
    assert!(harness.backend.runs().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ad_hoc_runs_get_distinct_ids(harness: Harness) {
    let name = health_worker_name();
    let first = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("first start");
    let second = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("second start");

    assert_ne!(first, second);
    assert_eq!(harness.backend.runs().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cron_scheduling_is_idempotent(harness: Harness) {
    let name = health_worker_name();
    let cron = CronSpec::new("*/5 * * * *").expect("valid cron");

    let first = harness
        .manager
        .schedule_as_cron(&name, cron.clone())
        .await
        .expect("first schedule");
    let second = harness
        .manager
        .schedule_as_cron(&name, cron)
        .await
        .expect("second schedule is a no-op");

    assert_eq!(first, second);
    assert_eq!(first.as_str(), "HealthCheckWorker-cron");
    // No second schedule was created.
    assert_eq!(harness.backend.runs().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn runs_dispatch_on_the_priority_queue(harness: Harness) {
    let name = health_worker_name();
    let run_id = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("start succeeds");

    let run = harness.manager.status(&run_id).await.expect("describe");
    assert_eq!(run.task_queue, WorkerPriority::Default.queue_name());
    assert_eq!(run.worker_type, name);
    assert_eq!(run.status, RunStatus::Running);
    assert!(run.close_time.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_run_ids_report_not_found(harness: Harness) {
    let result = harness.manager.status(&RunId::new("Ghost-run")).await;
    assert!(matches!(result, Err(OrchestrationError::RunNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_closes_a_running_worker(harness: Harness) {
    let run_id = harness
        .manager
        .run_immediately(&health_worker_name(), Vec::new())
        .await
        .expect("start succeeds");

    harness.manager.cancel(&run_id).await.expect("cancel");

    let run = harness.manager.status(&run_id).await.expect("describe");
    assert_eq!(run.status, RunStatus::Canceled);
    assert!(run.close_time.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_runs_reject_cancel_and_terminate_with_matching_errors(harness: Harness) {
    let name = health_worker_name();

    let completed = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("start");
    harness
        .backend
        .force_status(&completed, RunStatus::Completed)
        .expect("force completed");
    assert!(matches!(
        harness.manager.cancel(&completed).await,
        Err(OrchestrationError::AlreadyCompleted(_))
    ));
    assert!(matches!(
        harness.manager.terminate(&completed).await,
        Err(OrchestrationError::AlreadyCompleted(_))
    ));

    let cancelled = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("start");
    harness.manager.cancel(&cancelled).await.expect("cancel");
    assert!(matches!(
        harness.manager.cancel(&cancelled).await,
        Err(OrchestrationError::AlreadyCancelled(_))
    ));
    assert!(matches!(
        harness.manager.terminate(&cancelled).await,
        Err(OrchestrationError::AlreadyCancelled(_))
    ));

    let terminated = harness
        .manager
        .run_immediately(&name, Vec::new())
        .await
        .expect("start");
    harness
        .manager
        .terminate(&terminated)
        .await
        .expect("terminate");
    assert!(matches!(
        harness.manager.terminate(&terminated).await,
        Err(OrchestrationError::AlreadyTerminated(_))
    ));
    assert!(matches!(
        harness.manager.cancel(&terminated).await,
        Err(OrchestrationError::AlreadyTerminated(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn attached_registry_executes_one_shot_runs_to_completion() {
    let backend = Arc::new(
        InMemoryDurableBackend::new(Arc::new(DefaultClock)).with_registry(registry()),
    );
    let manager = WorkerManager::new(Arc::clone(&backend), registry());

    let run_id = manager
        .run_immediately(&health_worker_name(), Vec::new())
        .await
        .expect("start succeeds");

    let run = manager.status(&run_id).await.expect("describe");
    assert_eq!(run.status, RunStatus::Completed);
    assert!(run.close_time.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failures_surface_with_the_target_address() {
    let mut backend = MockBackend::new();
    backend.expect_start_run().returning(|_| {
        Err(BackendError::Connection {
            address: "localhost:7233".to_owned(),
        })
    });

    let manager = WorkerManager::new(Arc::new(backend), registry());
    let result = manager
        .run_immediately(&health_worker_name(), Vec::new())
        .await;

    let Err(OrchestrationError::ClientConnection { address }) = result else {
        panic!("expected a client connection error");
    };
    assert_eq!(address, "localhost:7233");
}

#[tokio::test(flavor = "multi_thread")]
async fn other_rpc_failures_become_start_errors() {
    let mut backend = MockBackend::new();
    backend
        .expect_start_run()
        .returning(|_| Err(BackendError::rpc(std::io::Error::other("boom"))));

    let manager = WorkerManager::new(Arc::new(backend), registry());
    let result = manager
        .run_immediately(&health_worker_name(), Vec::new())
        .await;

    assert!(matches!(result, Err(OrchestrationError::StartFailed(_))));
}

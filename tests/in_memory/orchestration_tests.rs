//! Worker orchestration flows over the in-memory backend.

use eyre::Result;

use taskdeck::orchestration::domain::{CronSpec, RunStatus, WorkerName};
use taskdeck::orchestration::services::OrchestrationError;

use crate::in_memory::helpers::world;

fn health_worker() -> WorkerName {
    WorkerName::new("HealthCheckWorker")
}

#[tokio::test(flavor = "multi_thread")]
async fn immediate_runs_execute_and_close() -> Result<()> {
    let world = world();

    let run_id = world
        .workers
        .run_immediately(&health_worker(), Vec::new())
        .await?;

    let run = world.workers.status(&run_id).await?;
    assert_eq!(run.status, RunStatus::Completed);
    assert!(run.close_time.is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn startup_style_cron_scheduling_is_idempotent() -> Result<()> {
    let world = world();
    let cron = CronSpec::new("*/10 * * * *")?;

    // The bootstrap schedules the health check; a second bootstrap (or
    // a restart) schedules it again and must not double it.
    let first = world
        .workers
        .schedule_as_cron(&health_worker(), cron.clone())
        .await?;
    let second = world.workers.schedule_as_cron(&health_worker(), cron).await?;

    assert_eq!(first, second);
    assert_eq!(world.worker_backend.runs().len(), 1);

    let run = world.workers.status(&first).await?;
    assert_eq!(run.status, RunStatus::Running);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_runs_refuse_further_transitions() -> Result<()> {
    let world = world();
    let run_id = world
        .workers
        .run_immediately(&health_worker(), Vec::new())
        .await?;

    // The inline executor already completed the run.
    assert!(matches!(
        world.workers.cancel(&run_id).await,
        Err(OrchestrationError::AlreadyCompleted(_))
    ));
    assert!(matches!(
        world.workers.terminate(&run_id).await,
        Err(OrchestrationError::AlreadyCompleted(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cron_schedules_can_be_cancelled() -> Result<()> {
    let world = world();
    let run_id = world
        .workers
        .schedule_as_cron(&health_worker(), CronSpec::new("*/5 * * * *")?)
        .await?;

    world.workers.cancel(&run_id).await?;
    let run = world.workers.status(&run_id).await?;
    assert_eq!(run.status, RunStatus::Canceled);

    // And cancelling again yields the named guard error.
    assert!(matches!(
        world.workers.cancel(&run_id).await,
        Err(OrchestrationError::AlreadyCancelled(_))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unregistered_workers_never_reach_the_backend() -> Result<()> {
    let world = world();

    assert!(matches!(
        world
            .workers
            .run_immediately(&WorkerName::new("MysteryWorker"), Vec::new())
            .await,
        Err(OrchestrationError::NotRegistered(_))
    ));
    assert!(world.worker_backend.runs().is_empty());
    Ok(())
}

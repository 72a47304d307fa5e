//! Orchestration services: the manager control surface and the
//! retrying run executor.

mod executor;
mod manager;

pub use executor::{RunExecutionError, RunExecutor};
pub use manager::{OrchestrationError, OrchestrationResult, WorkerManager};

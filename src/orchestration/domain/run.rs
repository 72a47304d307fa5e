//! Run identity, status, and snapshots.

use super::{ParseRunStatusError, WorkerName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Idempotency key for a run held by the durable-execution backend.
///
/// Ad-hoc runs get a fresh `{Name}-{uuid}` per call; cron schedules use
/// the fixed `{Name}-cron`, which is what makes recurring scheduling
/// idempotent system-wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Suffix of the single system-wide cron handle per worker class.
    const CRON_SUFFIX: &'static str = "cron";

    /// Wraps an existing run identifier (for lookups).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints a fresh ad-hoc run identifier; never idempotent across
    /// calls.
    #[must_use]
    pub fn ad_hoc(worker: &WorkerName) -> Self {
        Self(format!("{worker}-{}", Uuid::new_v4()))
    }

    /// Returns the fixed cron-schedule identifier for a worker class.
    #[must_use]
    pub fn cron(worker: &WorkerName) -> Self {
        Self(format!("{worker}-{}", Self::CRON_SUFFIX))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a run as reported by the backend.
///
/// `Running` is the only non-terminal state; nothing transitions out of
/// a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// The run is executing or awaiting dispatch.
    Running,
    /// The run finished successfully.
    Completed,
    /// The run exhausted its retry policy.
    Failed,
    /// The run was cancelled cooperatively.
    Canceled,
    /// The run was terminated forcibly.
    Terminated,
    /// The run exceeded the backend's overall time bound.
    TimedOut,
}

impl RunStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Terminated => "TERMINATED",
            Self::TimedOut => "TIMED_OUT",
        }
    }

    /// Returns whether no further transitions are legal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl TryFrom<&str> for RunStatus {
    type Error = ParseRunStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => Ok(Self::Running),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "CANCELED" => Ok(Self::Canceled),
            "TERMINATED" => Ok(Self::Terminated),
            "TIMED_OUT" => Ok(Self::TimedOut),
            _ => Err(ParseRunStatusError(value.to_owned())),
        }
    }
}

/// Point-in-time snapshot of a run, owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRun {
    /// The run's idempotency key.
    pub id: RunId,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// When the backend accepted the run.
    pub start_time: DateTime<Utc>,
    /// When the run reached a terminal state, if it has.
    pub close_time: Option<DateTime<Utc>>,
    /// Queue the run was dispatched on.
    pub task_queue: String,
    /// Worker class the run executes.
    pub worker_type: WorkerName,
}

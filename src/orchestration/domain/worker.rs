//! Worker identity, priority, and retry policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Registry identity of a worker class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerName(String);

impl WorkerName {
    /// Creates a worker name (trimmed verbatim; names come from code,
    /// not user input).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dispatch priority; each value maps to one backend task queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerPriority {
    /// Routine background work.
    #[default]
    Default,
    /// Latency-sensitive work dispatched on its own queue.
    Critical,
}

impl WorkerPriority {
    /// Returns the backend task-queue name for this priority.
    #[must_use]
    pub const fn queue_name(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Bounded retry applied to a single worker execution.
///
/// `max_duration` caps each attempt, `max_attempts` caps how many
/// attempts are made; both are enforced by the run executor, not by
/// worker implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum execution attempts (at least 1).
    pub max_attempts: u32,
    /// Wall-clock cap per attempt.
    pub max_duration: Duration,
}

impl RetryPolicy {
    /// Creates a policy; zero attempts are clamped to one.
    #[must_use]
    pub const fn new(max_attempts: u32, max_duration: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self {
            max_attempts,
            max_duration,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(30))
    }
}

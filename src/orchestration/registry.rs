//! Startup registry of worker classes.
//!
//! Built explicitly once at process startup and injected where needed;
//! there is no global mutable registry. Priority and retry policy are
//! captured at registration time so later lookups are cheap and
//! consistent.

use std::collections::HashMap;
use std::sync::Arc;

use crate::orchestration::domain::{RetryPolicy, WorkerName, WorkerPriority};
use crate::orchestration::ports::Worker;

/// A worker class together with its captured dispatch metadata.
#[derive(Clone)]
pub struct RegisteredWorker {
    worker: Arc<dyn Worker>,
    priority: WorkerPriority,
    retry_policy: RetryPolicy,
}

impl RegisteredWorker {
    /// Returns the worker implementation.
    #[must_use]
    pub fn worker(&self) -> &Arc<dyn Worker> {
        &self.worker
    }

    /// Returns the dispatch priority captured at registration.
    #[must_use]
    pub const fn priority(&self) -> WorkerPriority {
        self.priority
    }

    /// Returns the retry policy captured at registration.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }
}

/// Immutable name-to-worker lookup built at startup.
#[derive(Clone, Default)]
pub struct WorkerRegistry {
    entries: HashMap<String, RegisteredWorker>,
}

impl WorkerRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> WorkerRegistryBuilder {
        WorkerRegistryBuilder::default()
    }

    /// Looks up a registered worker by name.
    #[must_use]
    pub fn get(&self, name: &WorkerName) -> Option<&RegisteredWorker> {
        self.entries.get(name.as_str())
    }

    /// Returns whether a worker class is registered.
    #[must_use]
    pub fn is_registered(&self, name: &WorkerName) -> bool {
        self.entries.contains_key(name.as_str())
    }

    /// Returns the names of all registered workers.
    #[must_use]
    pub fn names(&self) -> Vec<WorkerName> {
        self.entries
            .keys()
            .map(|name| WorkerName::new(name.as_str()))
            .collect()
    }
}

/// Builder collecting worker registrations.
#[derive(Clone, Default)]
pub struct WorkerRegistryBuilder {
    entries: HashMap<String, RegisteredWorker>,
}

impl WorkerRegistryBuilder {
    /// Registers a worker class, capturing its priority and retry
    /// policy. Registering the same name twice keeps the latest entry.
    #[must_use]
    pub fn register(mut self, worker: Arc<dyn Worker>) -> Self {
        let name = worker.name();
        let entry = RegisteredWorker {
            priority: worker.priority(),
            retry_policy: worker.retry_policy(),
            worker,
        };
        self.entries.insert(name.as_str().to_owned(), entry);
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> WorkerRegistry {
        WorkerRegistry {
            entries: self.entries,
        }
    }
}

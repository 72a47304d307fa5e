//! Shipped worker implementations.

mod health_check;

pub use health_check::{AlwaysHealthy, HealthCheckWorker, HealthProbe, ProbeError};

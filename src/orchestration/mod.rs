//! Worker orchestration over an external durable-execution backend.
//!
//! Background job classes register once at startup with a priority and
//! a retry policy; the manager provides a typed, idempotent control
//! surface (run now, schedule as cron, describe, cancel, terminate)
//! and maps every backend failure to a named error kind. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The startup registry in [`registry`]
//! - Shipped worker implementations in [`workers`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;
pub mod workers;

#[cfg(test)]
mod tests;

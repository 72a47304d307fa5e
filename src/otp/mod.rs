//! One-time-password issuance and verification for phone login.
//!
//! At most one OTP per phone number is active at a time; issuing a new
//! code expires all earlier ones, and a code verifies at most once. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

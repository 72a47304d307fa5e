//! Account management: registration, authentication, profile updates,
//! and soft deletion.
//!
//! Accounts carry one or both identity methods: a unique username with
//! a password, or a unique phone number (OTP-based login). The module
//! follows hexagonal architecture:
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

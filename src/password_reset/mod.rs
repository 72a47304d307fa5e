//! Hashed, expiring, single-use password-reset tokens.
//!
//! Only a digest of the raw token is stored; the raw value travels to
//! the account owner in a security-critical email that bypasses
//! notification preferences. The module follows hexagonal architecture:
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

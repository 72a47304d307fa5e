//! Account-scoped task and comment management.
//!
//! Tasks belong to exactly one account; comments belong to a task and
//! carry their author. Listings are paginated and sorted, deletions are
//! soft, and comment mutation is author-checked. The module follows
//! hexagonal architecture:
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

//! Adapter implementations of the backend port.

pub mod memory;

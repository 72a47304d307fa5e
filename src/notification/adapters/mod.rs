//! Adapter implementations of the notification ports.

pub mod logging;
pub mod memory;
pub mod postgres;

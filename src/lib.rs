//! Taskdeck: multi-tenant task-management backend.
//!
//! This crate provides the domain, persistence, and orchestration core
//! behind a task-management product: account registration and login
//! (username/password and phone/OTP), password reset, notification
//! preferences, task and comment CRUD, and background-worker control
//! over an external durable-execution backend.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, providers)
//!
//! # Modules
//!
//! - [`config`]: Layered configuration resolution and typed settings
//! - [`account`]: Account identity, authentication, and lifecycle
//! - [`otp`]: One-time passwords for phone login
//! - [`access_token`]: Stateless signed access tokens
//! - [`password_reset`]: Hashed, expiring, single-use reset tokens
//! - [`notification`]: Preference-gated email/SMS dispatch
//! - [`task`]: Account-scoped tasks and author-checked comments
//! - [`orchestration`]: Background-worker control surface
//! - [`error`]: Stable error codes and HTTP-status hints

pub mod access_token;
pub mod account;
pub mod config;
pub mod error;
pub mod notification;
pub mod orchestration;
pub mod otp;
pub mod password_reset;
pub mod task;

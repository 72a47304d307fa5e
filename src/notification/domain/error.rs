//! Error types for notification domain operations.

use thiserror::Error;

/// Errors returned while building notification payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// An email template failed to render.
    #[error("email template failed to render: {reason}")]
    TemplateRender {
        /// Renderer diagnostic.
        reason: String,
    },
}

//! Error types for orchestration domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing orchestration domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestrationDomainError {
    /// The cron expression did not parse.
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression {
        /// The rejected expression.
        expression: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Error returned while parsing run statuses from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown run status: {0}")]
pub struct ParseRunStatusError(pub String);

//! Orchestration services for reset-token issuance and verification.

mod tokens;

pub use tokens::{
    PasswordResetService, PasswordResetServiceError, PasswordResetServiceResult,
};

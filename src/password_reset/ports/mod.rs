//! Port contracts for reset-token persistence.

mod repository;

pub use repository::{
    PasswordResetTokenRepository, ResetTokenRepositoryError, ResetTokenRepositoryResult,
};

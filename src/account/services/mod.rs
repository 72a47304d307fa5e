//! Orchestration services for account lifecycle operations.

mod accounts;

pub use accounts::{
    AccountDeletionReceipt, AccountService, AccountServiceError, AccountServiceResult,
    CreateAccountRequest, UpdateProfileRequest,
};

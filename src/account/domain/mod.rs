//! Domain types for account identity and lifecycle.

mod account;
mod error;
mod ids;
mod password;

pub use account::{Account, AccountProfile, PersistedAccountData};
pub use error::AccountDomainError;
pub use ids::{AccountId, PhoneNumber, Username};
pub use password::HashedPassword;

//! Provider ports for email and SMS delivery.
//!
//! The concrete third-party delivery clients live outside this crate;
//! these traits are the seam they plug into.

use crate::notification::domain::{EmailMessage, SmsMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a delivery provider.
///
/// Provider-specific error types never cross this boundary.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider rejected or failed the delivery.
    #[error("delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Wraps a provider failure.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Email delivery contract.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Delivers a rendered email.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider fails the delivery.
    async fn send_email(&self, message: &EmailMessage) -> Result<(), ProviderError>;
}

/// SMS delivery contract.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Delivers a text message.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider fails the delivery.
    async fn send_sms(&self, message: &SmsMessage) -> Result<(), ProviderError>;
}

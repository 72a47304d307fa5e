//! Providers that log deliveries instead of performing them.
//!
//! Used in environments without real delivery credentials.

use async_trait::async_trait;

use crate::notification::{
    domain::{EmailMessage, SmsMessage},
    ports::{EmailProvider, ProviderError, SmsProvider},
};

/// Email provider that emits a tracing event per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailProvider;

#[async_trait]
impl EmailProvider for LogEmailProvider {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), ProviderError> {
        tracing::info!(
            recipient = %message.recipient,
            subject = %message.subject,
            "email delivery (log provider)"
        );
        Ok(())
    }
}

/// SMS provider that emits a tracing event per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSmsProvider;

#[async_trait]
impl SmsProvider for LogSmsProvider {
    async fn send_sms(&self, message: &SmsMessage) -> Result<(), ProviderError> {
        tracing::info!(
            recipient = %message.recipient,
            "sms delivery (log provider)"
        );
        Ok(())
    }
}

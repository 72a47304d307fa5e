//! Outbound message payloads handed to provider ports.

use crate::account::domain::PhoneNumber;
use serde::{Deserialize, Serialize};

/// Sender identity for outbound email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSender {
    /// Sender address.
    pub email: String,
    /// Sender display name.
    pub name: String,
}

impl EmailSender {
    /// Creates a sender identity.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A fully rendered email ready for a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Sender identity.
    pub sender: EmailSender,
    /// Recipient address.
    pub recipient: String,
    /// Rendered subject line.
    pub subject: String,
    /// Rendered plain-text body.
    pub body: String,
}

/// A text message ready for an SMS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Recipient phone number.
    pub recipient: PhoneNumber,
    /// Message body.
    pub body: String,
}

//! Domain types for notification preferences and outbound messages.

mod error;
mod message;
mod preferences;
mod template;

pub use error::NotificationDomainError;
pub use message::{EmailMessage, EmailSender, SmsMessage};
pub use preferences::{
    Channel, NotificationPreferences, PersistedPreferencesData, PreferencesPatch,
};
pub use template::{EmailTemplate, RenderedEmail};

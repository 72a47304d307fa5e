//! Layered configuration resolution.
//!
//! Configuration is assembled at startup from an ordered list of layers
//! (built-in defaults, an environment overlay, OS environment variables)
//! deep-merged into a single lookup tree. Services never read the
//! environment themselves; they receive typed settings decoded from the
//! merged tree.

mod resolver;
mod settings;

pub use resolver::{ConfigError, ConfigResolver, ConfigResolverBuilder};
pub use settings::{
    AccountSettings, AppSettings, MailerSettings, OrchestrationSettings, OtpSettings,
    PasswordResetSettings,
};

#[cfg(test)]
mod tests;

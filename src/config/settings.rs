//! Typed settings decoded from the merged configuration tree.

use serde_json::{Value, json};

use super::resolver::{ConfigError, ConfigResolver};

/// Settings for account credentials and access tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    /// HS256 signing key for access tokens.
    pub token_signing_key: String,
    /// Access-token lifetime in days.
    pub token_expiry_days: i64,
}

/// Settings for password-reset tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetSettings {
    /// Reset-token lifetime in seconds.
    pub token_ttl_seconds: i64,
    /// Public host used to build reset links in emails.
    pub web_app_host: String,
}

/// Settings controlling OTP generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OtpSettings {
    /// Fixed test code returned instead of a random one; `None`
    /// disables the default-OTP bypass entirely.
    pub default_code: Option<String>,
    /// When set and non-empty, only this phone number receives the
    /// fixed code; an empty string whitelists every number.
    pub whitelisted_phone_number: Option<String>,
}

impl OtpSettings {
    /// Returns whether the phone number should receive the fixed test
    /// code instead of a random one (and skip the real SMS send).
    #[must_use]
    pub fn is_default_number(&self, phone_number: &str) -> bool {
        if self.default_code.is_none() {
            return false;
        }
        match self.whitelisted_phone_number.as_deref() {
            None | Some("") => true,
            Some(whitelisted) => phone_number == whitelisted,
        }
    }
}

/// Settings for the durable-execution backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationSettings {
    /// Address of the durable-execution server.
    pub server_address: String,
    /// Connection attempts made by the backend client itself.
    pub connection_retries: u32,
}

/// Sender identity for outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerSettings {
    /// Sender address.
    pub sender_email: String,
    /// Sender display name.
    pub sender_name: String,
}

/// All typed settings consumed at composition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Account/token settings.
    pub accounts: AccountSettings,
    /// Password-reset settings.
    pub password_reset: PasswordResetSettings,
    /// OTP settings.
    pub otp: OtpSettings,
    /// Orchestration backend settings.
    pub orchestration: OrchestrationSettings,
    /// Mail sender settings.
    pub mailer: MailerSettings,
}

impl AppSettings {
    /// Decodes typed settings from a merged configuration tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is absent or holds a
    /// value of the wrong type.
    pub fn load(resolver: &ConfigResolver) -> Result<Self, ConfigError> {
        let default_code = resolver
            .get("otp.default_code")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let whitelisted_phone_number = resolver
            .get("otp.whitelisted_phone_number")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let connection_retries =
            u32::try_from(resolver.get_i64("orchestration.connection_retries")?).map_err(|_| {
                ConfigError::WrongType {
                    key: "orchestration.connection_retries".to_owned(),
                    expected: "unsigned integer",
                    actual: "number",
                }
            })?;

        Ok(Self {
            accounts: AccountSettings {
                token_signing_key: resolver.get_str("accounts.token_signing_key")?.to_owned(),
                token_expiry_days: resolver.get_i64("accounts.token_expiry_days")?,
            },
            password_reset: PasswordResetSettings {
                token_ttl_seconds: resolver.get_i64("password_reset.token_ttl_seconds")?,
                web_app_host: resolver.get_str("password_reset.web_app_host")?.to_owned(),
            },
            otp: OtpSettings {
                default_code,
                whitelisted_phone_number,
            },
            orchestration: OrchestrationSettings {
                server_address: resolver.get_str("orchestration.server_address")?.to_owned(),
                connection_retries,
            },
            mailer: MailerSettings {
                sender_email: resolver.get_str("mailer.sender_email")?.to_owned(),
                sender_name: resolver.get_str("mailer.sender_name")?.to_owned(),
            },
        })
    }

    /// Built-in defaults forming the lowest configuration layer.
    #[must_use]
    pub fn default_layer() -> Value {
        json!({
            "accounts": {
                "token_signing_key": "insecure-development-key",
                "token_expiry_days": 30,
            },
            "password_reset": {
                "token_ttl_seconds": 3600,
                "web_app_host": "http://localhost:3000",
            },
            "otp": {},
            "orchestration": {
                "server_address": "localhost:7233",
                "connection_retries": 3,
            },
            "mailer": {
                "sender_email": "no-reply@example.com",
                "sender_name": "Taskdeck",
            },
        })
    }
}

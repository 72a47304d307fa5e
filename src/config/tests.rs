//! Resolver merge and typed-lookup tests.

use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::Mutex;

use super::{AppSettings, ConfigError, ConfigResolver};

/// Serializes tests that mutate process environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn later_layers_override_scalars_and_merge_objects() {
    let resolver = ConfigResolver::builder()
        .layer(json!({
            "accounts": {"token_expiry_days": 30, "token_signing_key": "base"},
            "feature": true,
        }))
        .layer(json!({
            "accounts": {"token_expiry_days": 7},
        }))
        .build();

    assert_eq!(resolver.get_i64("accounts.token_expiry_days"), Ok(7));
    assert_eq!(resolver.get_str("accounts.token_signing_key"), Ok("base"));
    assert_eq!(resolver.get_bool("feature"), Ok(true));
}

#[test]
fn missing_and_mistyped_keys_are_distinct_errors() {
    let resolver = ConfigResolver::builder()
        .layer(json!({"otp": {"default_code": "1234"}}))
        .build();

    assert_eq!(
        resolver.get_str("otp.absent"),
        Err(ConfigError::MissingKey("otp.absent".to_owned()))
    );
    assert!(matches!(
        resolver.get_i64("otp.default_code"),
        Err(ConfigError::WrongType { .. })
    ));
}

#[test]
fn os_env_layer_nests_and_types_values() {
    let guard = ENV_LOCK.lock().expect("env lock");
    // SAFETY: access to process environment is serialized by ENV_LOCK.
    unsafe {
        std::env::set_var("TD_TEST__ACCOUNTS__TOKEN_EXPIRY_DAYS", "14");
        std::env::set_var("TD_TEST__OTP__DEFAULT_CODE", "0000");
    }

    let resolver = ConfigResolver::builder()
        .layer(AppSettings::default_layer())
        .os_env_layer("TD_TEST__")
        .build();

    assert_eq!(resolver.get_i64("accounts.token_expiry_days"), Ok(14));
    assert_eq!(resolver.get_str("otp.default_code"), Ok("0000"));

    // SAFETY: still under ENV_LOCK.
    unsafe {
        std::env::remove_var("TD_TEST__ACCOUNTS__TOKEN_EXPIRY_DAYS");
        std::env::remove_var("TD_TEST__OTP__DEFAULT_CODE");
    }
    drop(guard);
}

#[test]
fn settings_load_from_default_layer() {
    let resolver = ConfigResolver::builder()
        .layer(AppSettings::default_layer())
        .build();
    let settings = AppSettings::load(&resolver).expect("defaults decode");

    assert_eq!(settings.accounts.token_expiry_days, 30);
    assert_eq!(settings.orchestration.connection_retries, 3);
    assert!(settings.otp.default_code.is_none());
}

#[test]
fn default_otp_applies_only_with_code_and_matching_whitelist() {
    let enabled_for_all = super::OtpSettings {
        default_code: Some("1234".to_owned()),
        whitelisted_phone_number: None,
    };
    assert!(enabled_for_all.is_default_number("+15550001111"));

    let empty_whitelist = super::OtpSettings {
        default_code: Some("1234".to_owned()),
        whitelisted_phone_number: Some(String::new()),
    };
    assert!(empty_whitelist.is_default_number("+15550001111"));

    let pinned = super::OtpSettings {
        default_code: Some("1234".to_owned()),
        whitelisted_phone_number: Some("+15550001111".to_owned()),
    };
    assert!(pinned.is_default_number("+15550001111"));
    assert!(!pinned.is_default_number("+15550002222"));

    let disabled = super::OtpSettings::default();
    assert!(!disabled.is_default_number("+15550001111"));
}

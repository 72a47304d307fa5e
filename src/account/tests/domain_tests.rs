//! Domain validation tests for account scalar types and lifecycle.

use mockable::DefaultClock;
use rstest::rstest;

use crate::account::domain::{
    Account, AccountDomainError, AccountProfile, HashedPassword, PhoneNumber, Username,
};

#[rstest]
#[case("alice")]
#[case("  Alice  ")]
#[case("ALICE")]
fn username_normalizes_to_lowercase_trimmed(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_str(), "alice");
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_username_is_rejected(#[case] raw: &str) {
    assert_eq!(
        Username::new(raw),
        Err(AccountDomainError::EmptyUsername)
    );
}

#[test]
fn phone_number_requires_plus_prefixed_country_code() {
    let phone = PhoneNumber::from_parts("+91", "9999999999").expect("valid phone");
    assert_eq!(phone.to_string(), "+919999999999");

    assert!(PhoneNumber::from_parts("91", "9999999999").is_err());
    assert!(PhoneNumber::from_parts("+", "9999999999").is_err());
    assert!(PhoneNumber::from_parts("+1234", "9999999999").is_err());
    assert!(PhoneNumber::from_parts("+91", "12ab").is_err());
    assert!(PhoneNumber::from_parts("+91", "123").is_err());
}

#[test]
fn password_hash_verifies_only_matching_password() {
    let digest = HashedPassword::hash("hunter2").expect("hashing succeeds");
    assert!(digest.verify("hunter2"));
    assert!(!digest.verify("hunter3"));
}

#[test]
fn credentials_account_carries_profile_and_username() {
    let clock = DefaultClock;
    let digest = HashedPassword::hash("p1").expect("hashing succeeds");
    let username = Username::new("alice").expect("valid username");
    let account = Account::new_with_credentials(
        AccountProfile::new("Alice", "Liddell"),
        username,
        digest,
        &clock,
    );

    assert!(account.is_active());
    assert_eq!(account.profile().first_name, "Alice");
    assert!(account.username().is_some());
    assert!(account.phone_number().is_none());
    assert!(account.hashed_password().is_some());
}

#[test]
fn phone_account_starts_with_blank_profile_and_no_password() {
    let clock = DefaultClock;
    let phone = PhoneNumber::from_parts("+1", "5550001111").expect("valid phone");
    let account = Account::new_with_phone_number(phone, &clock);

    assert!(account.is_active());
    assert_eq!(account.profile().first_name, "");
    assert!(account.username().is_none());
    assert!(account.hashed_password().is_none());
}

#[test]
fn deactivate_flips_active_and_touches_timestamp() {
    let clock = DefaultClock;
    let phone = PhoneNumber::from_parts("+1", "5550001111").expect("valid phone");
    let mut account = Account::new_with_phone_number(phone, &clock);
    let created_at = account.created_at();

    account.deactivate(&clock);
    assert!(!account.is_active());
    assert!(account.updated_at() >= created_at);
}

#[test]
fn profile_update_leaves_unset_fields_untouched() {
    let clock = DefaultClock;
    let digest = HashedPassword::hash("p1").expect("hashing succeeds");
    let username = Username::new("alice").expect("valid username");
    let mut account = Account::new_with_credentials(
        AccountProfile::new("Alice", "Liddell"),
        username,
        digest,
        &clock,
    );

    account.update_profile(Some("Alicia".to_owned()), None, &clock);
    assert_eq!(account.profile().first_name, "Alicia");
    assert_eq!(account.profile().last_name, "Liddell");
}

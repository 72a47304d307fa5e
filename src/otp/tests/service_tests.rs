//! Issuance and verification tests against the in-memory repository.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::account::domain::PhoneNumber;
use crate::config::OtpSettings;
use crate::notification::adapters::memory::RecordingSmsProvider;
use crate::notification::ports::SmsProvider;
use crate::otp::{
    adapters::memory::InMemoryOtpRepository,
    domain::OtpStatus,
    services::{OtpService, OtpServiceError},
};

type TestService = OtpService<InMemoryOtpRepository, DefaultClock>;

struct Harness {
    service: TestService,
    sms: Arc<RecordingSmsProvider>,
}

fn build_harness(settings: OtpSettings) -> Harness {
    let sms = Arc::new(RecordingSmsProvider::new());
    let service = OtpService::new(
        Arc::new(InMemoryOtpRepository::new()),
        Arc::clone(&sms) as Arc<dyn SmsProvider>,
        settings,
        Arc::new(DefaultClock),
    );
    Harness { service, sms }
}

#[fixture]
fn harness() -> Harness {
    build_harness(OtpSettings::default())
}

fn phone() -> PhoneNumber {
    PhoneNumber::from_parts("+91", "9999999999").expect("valid phone")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_issues_pending_four_digit_code_and_sends_sms(harness: Harness) {
    let otp = harness.service.create(phone()).await.expect("issuance");

    assert_eq!(otp.status(), OtpStatus::Pending);
    assert!(otp.is_active());
    assert_eq!(otp.code().as_str().len(), 4);
    assert!(otp.code().as_str().chars().all(|c| c.is_ascii_digit()));

    let sent = harness.sms.sent();
    assert_eq!(sent.len(), 1);
    let body = sent.first().map(|m| m.body.clone()).unwrap_or_default();
    assert!(body.contains(otp.code().as_str()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_new_code_expires_the_previous_one(harness: Harness) {
    let first = harness.service.create(phone()).await.expect("first code");
    let second = harness.service.create(phone()).await.expect("second code");

    // The first code is now retired; verifying it reports expiry.
    let result = harness
        .service
        .verify(&phone(), first.code().as_str())
        .await;
    if first.code() == second.code() {
        // Random collision: the shared code still verifies once.
        assert!(result.is_ok());
    } else {
        assert!(matches!(result, Err(OtpServiceError::OtpExpired)));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn verify_succeeds_once_then_reports_expired(harness: Harness) {
    let otp = harness.service.create(phone()).await.expect("issuance");

    let verified = harness
        .service
        .verify(&phone(), otp.code().as_str())
        .await
        .expect("first verification succeeds");
    assert_eq!(verified.status(), OtpStatus::Success);
    assert!(!verified.is_active());

    // Single-use: the second attempt is expired, not incorrect.
    assert!(matches!(
        harness.service.verify(&phone(), otp.code().as_str()).await,
        Err(OtpServiceError::OtpExpired)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_or_malformed_codes_are_incorrect(harness: Harness) {
    harness.service.create(phone()).await.expect("issuance");

    assert!(matches!(
        harness.service.verify(&phone(), "no-digits").await,
        Err(OtpServiceError::IncorrectOtp)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn whitelisted_number_gets_fixed_code_without_sms() {
    let harness = build_harness(OtpSettings {
        default_code: Some("1234".to_owned()),
        whitelisted_phone_number: Some("+919999999999".to_owned()),
    });

    let otp = harness.service.create(phone()).await.expect("issuance");
    assert_eq!(otp.code().as_str(), "1234");
    assert!(harness.sms.sent().is_empty());

    harness
        .service
        .verify(&phone(), "1234")
        .await
        .expect("fixed code verifies");
}

#[tokio::test(flavor = "multi_thread")]
async fn non_whitelisted_number_gets_random_code_and_sms() {
    let harness = build_harness(OtpSettings {
        default_code: Some("1234".to_owned()),
        whitelisted_phone_number: Some("+15550001111".to_owned()),
    });

    let otp = harness.service.create(phone()).await.expect("issuance");
    assert_eq!(otp.code().as_str().len(), 4);
    assert_eq!(harness.sms.sent().len(), 1);
}

//! Service orchestration tests for account lifecycle operations.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::account::{
    adapters::memory::InMemoryAccountRepository,
    domain::{AccountId, PhoneNumber},
    ports::{ResetTokenGuard, ResetTokenGuardError, VerifiedResetToken},
    services::{AccountService, AccountServiceError, CreateAccountRequest, UpdateProfileRequest},
};
use crate::notification::{
    adapters::memory::InMemoryPreferencesRepository,
    domain::Channel,
    services::NotificationPreferencesService,
};

/// Guard stub that accepts a single fixed token string.
#[derive(Debug, Clone)]
struct FixedTokenGuard {
    accepted: String,
}

#[async_trait]
impl ResetTokenGuard for FixedTokenGuard {
    async fn verify(
        &self,
        account_id: AccountId,
        presented: &str,
    ) -> Result<VerifiedResetToken, ResetTokenGuardError> {
        if presented == self.accepted {
            Ok(VerifiedResetToken::new(uuid::Uuid::new_v4()))
        } else {
            Err(ResetTokenGuardError::Mismatch(account_id))
        }
    }

    async fn consume(&self, _token: VerifiedResetToken) -> Result<(), ResetTokenGuardError> {
        Ok(())
    }
}

type TestService =
    AccountService<InMemoryAccountRepository, InMemoryPreferencesRepository, DefaultClock>;

struct Harness {
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(DefaultClock);
    let preferences = Arc::new(InMemoryPreferencesRepository::new());
    let service = AccountService::new(
        Arc::new(InMemoryAccountRepository::new()),
        NotificationPreferencesService::new(preferences, Arc::clone(&clock)),
        Arc::new(FixedTokenGuard {
            accepted: "reset-me".to_owned(),
        }),
        clock,
    );
    Harness { service }
}

fn create_request() -> CreateAccountRequest {
    CreateAccountRequest::new("Alice", "Liddell", "alice", "p1")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_credentials_provisions_default_preferences(harness: Harness) {
    let account = harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("account creation should succeed");

    let preferences = harness
        .service
        .notification_preferences()
        .get(account.id())
        .await
        .expect("preferences should be provisioned");
    assert!(preferences.channel_enabled(Channel::Email));
    assert!(preferences.channel_enabled(Channel::Push));
    assert!(preferences.channel_enabled(Channel::Sms));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_active_username_is_a_conflict(harness: Harness) {
    harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("first creation should succeed");

    let result = harness
        .service
        .create_with_credentials(CreateAccountRequest::new("Other", "User", "alice", "p2"))
        .await;
    assert!(matches!(result, Err(AccountServiceError::UsernameTaken(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn username_is_reusable_after_soft_delete(harness: Harness) {
    let account = harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("creation should succeed");
    harness
        .service
        .deactivate(account.id())
        .await
        .expect("deletion should succeed");

    // Every lookup now misses.
    assert!(matches!(
        harness.service.get_by_id(account.id()).await,
        Err(AccountServiceError::NotFoundById(_))
    ));
    assert!(matches!(
        harness.service.get_by_username("alice").await,
        Err(AccountServiceError::NotFoundByUsername(_))
    ));

    // And the username is free again.
    harness
        .service
        .create_with_credentials(CreateAccountRequest::new("New", "Alice", "alice", "p3"))
        .await
        .expect("username should be reusable after soft delete");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_or_create_by_phone_number_is_idempotent(harness: Harness) {
    let phone = PhoneNumber::from_parts("+91", "9999999999").expect("valid phone");

    let first = harness
        .service
        .get_or_create_by_phone_number(phone.clone())
        .await
        .expect("first call creates");
    let second = harness
        .service
        .get_or_create_by_phone_number(phone)
        .await
        .expect("second call fetches");

    assert_eq!(first.id(), second.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn authenticate_rejects_wrong_password(harness: Harness) {
    harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("creation should succeed");

    let authenticated = harness
        .service
        .authenticate_by_credentials("alice", "p1")
        .await
        .expect("correct password should authenticate");
    assert_eq!(
        authenticated.username().map(|u| u.as_str().to_owned()),
        Some("alice".to_owned())
    );

    assert!(matches!(
        harness
            .service
            .authenticate_by_credentials("alice", "wrong")
            .await,
        Err(AccountServiceError::InvalidPassword)
    ));
    assert!(matches!(
        harness
            .service
            .authenticate_by_credentials("nobody", "p1")
            .await,
        Err(AccountServiceError::NotFoundByUsername(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn phone_account_has_no_password_to_authenticate_with(harness: Harness) {
    let phone = PhoneNumber::from_parts("+1", "5550001111").expect("valid phone");
    let account = harness
        .service
        .get_or_create_by_phone_number(phone)
        .await
        .expect("creation should succeed");

    // A blank-profile phone account never authenticates by password,
    // and it has no username to look up either.
    assert!(account.hashed_password().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_profile_patches_only_provided_fields(harness: Harness) {
    let account = harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("creation should succeed");

    let updated = harness
        .service
        .update_profile(
            account.id(),
            UpdateProfileRequest::new().with_last_name("Pleasance"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.profile().first_name, "Alice");
    assert_eq!(updated.profile().last_name, "Pleasance");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_password_requires_matching_token(harness: Harness) {
    let account = harness
        .service
        .create_with_credentials(create_request())
        .await
        .expect("creation should succeed");

    let result = harness
        .service
        .reset_password(account.id(), "not-the-token", "p2")
        .await;
    assert!(matches!(
        result,
        Err(AccountServiceError::ResetTokenMismatch(_))
    ));

    harness
        .service
        .reset_password(account.id(), "reset-me", "p2")
        .await
        .expect("matching token should reset");

    harness
        .service
        .authenticate_by_credentials("alice", "p2")
        .await
        .expect("new password should authenticate");
    assert!(matches!(
        harness
            .service
            .authenticate_by_credentials("alice", "p1")
            .await,
        Err(AccountServiceError::InvalidPassword)
    ));
}

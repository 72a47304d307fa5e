//! End-to-end authentication flows: credentials, phone/OTP, and
//! password reset.

use eyre::Result;

use taskdeck::access_token::BearerToken;
use taskdeck::account::domain::PhoneNumber;
use taskdeck::account::services::{AccountServiceError, CreateAccountRequest};
use taskdeck::error::ErrorCode;

use crate::in_memory::helpers::world;

#[tokio::test(flavor = "multi_thread")]
async fn credentials_signup_login_and_delete_round_trip() -> Result<()> {
    let world = world();

    // Signup.
    let account = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p1"))
        .await?;

    // Login: authenticate, mint a token, verify it from a bearer
    // header, and use the claims to load the account.
    let authenticated = world.accounts.authenticate_by_credentials("alice", "p1").await?;
    assert_eq!(authenticated.id(), account.id());

    let token = world.tokens.issue(account.id())?;
    let bearer = BearerToken::from_header(Some(&format!("Bearer {}", token.token)))?;
    let claims = world.tokens.verify(bearer.as_str())?;
    claims.ensure_account(account.id())?;

    let fetched = world.accounts.get_by_id(claims.account_id).await?;
    assert_eq!(
        fetched.username().map(|u| u.as_str().to_owned()),
        Some("alice".to_owned())
    );

    // Delete, then every lookup misses with the stable not-found code.
    world.accounts.deactivate(account.id()).await?;
    let missing = world
        .accounts
        .get_by_id(account.id())
        .await
        .expect_err("deleted account is invisible");
    assert_eq!(missing.code(), "ACCOUNT_ERR_02");
    assert_eq!(missing.http_status(), 404);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn phone_otp_login_issues_single_use_codes() -> Result<()> {
    let world = world();
    let phone = PhoneNumber::from_parts("+91", "9999999999")?;

    // First contact creates the account idempotently.
    let account = world
        .accounts
        .get_or_create_by_phone_number(phone.clone())
        .await?;
    let again = world
        .accounts
        .get_or_create_by_phone_number(phone.clone())
        .await?;
    assert_eq!(account.id(), again.id());

    // Issue and verify a code; the SMS went out with the code in it.
    let otp = world.otps.create(phone.clone()).await?;
    let sms = world.sms.sent();
    assert_eq!(sms.len(), 1);
    assert!(
        sms.first()
            .map(|m| m.body.contains(otp.code().as_str()))
            .unwrap_or_default()
    );

    let verified = world.otps.verify(&phone, otp.code().as_str()).await?;
    assert!(!verified.is_active());

    // A verified login mints a token like any other.
    let token = world.tokens.issue(account.id())?;
    world.tokens.verify(&token.token)?;

    // The code cannot verify twice.
    assert!(world.otps.verify(&phone, otp.code().as_str()).await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn password_reset_flow_consumes_the_token() -> Result<()> {
    let world = world();
    let account = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new(
            "Alice",
            "Liddell",
            "alice@example.com",
            "old-password",
        ))
        .await?;

    // Request a reset; the raw token reaches the account by email.
    let (_, raw_token) = world.resets.create_for_account(&account).await?;
    assert_eq!(world.email.sent().len(), 1);

    // Change the password using the emailed token.
    world
        .accounts
        .reset_password(account.id(), raw_token.as_str(), "new-password")
        .await?;

    world
        .accounts
        .authenticate_by_credentials("alice@example.com", "new-password")
        .await?;
    assert!(matches!(
        world
            .accounts
            .authenticate_by_credentials("alice@example.com", "old-password")
            .await,
        Err(AccountServiceError::InvalidPassword)
    ));

    // The token was consumed with the change.
    assert!(matches!(
        world
            .accounts
            .reset_password(account.id(), raw_token.as_str(), "another-password")
            .await,
        Err(AccountServiceError::ResetTokenUsed(_))
    ));
    Ok(())
}

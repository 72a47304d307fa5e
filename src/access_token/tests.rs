//! Issuance, verification, and header-parsing tests.

use jsonwebtoken::{EncodingKey, Header, encode};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

use super::{AccessTokenClaims, AccessTokenError, AccessTokenIssuer, BearerToken};
use crate::account::domain::AccountId;
use crate::config::AccountSettings;

const SIGNING_KEY: &str = "test-signing-key";

fn settings() -> AccountSettings {
    AccountSettings {
        token_signing_key: SIGNING_KEY.to_owned(),
        token_expiry_days: 30,
    }
}

#[fixture]
fn issuer() -> AccessTokenIssuer<DefaultClock> {
    AccessTokenIssuer::new(&settings(), Arc::new(DefaultClock))
}

#[rstest]
fn issued_token_verifies_and_echoes_account(issuer: AccessTokenIssuer<DefaultClock>) {
    let account_id = AccountId::new();
    let token = issuer.issue(account_id).expect("issuance succeeds");

    let claims = issuer.verify(&token.token).expect("verification succeeds");
    assert_eq!(claims.account_id, account_id);
    assert_eq!(claims.exp, token.expires_at.timestamp());
}

#[rstest]
fn expired_token_is_distinct_from_invalid(issuer: AccessTokenIssuer<DefaultClock>) {
    let account_id = AccountId::new();
    let stale_claims = AccessTokenClaims {
        account_id,
        exp: chrono::Utc::now().timestamp() - 600,
    };
    let stale = encode(
        &Header::default(),
        &stale_claims,
        &EncodingKey::from_secret(SIGNING_KEY.as_bytes()),
    )
    .expect("encoding succeeds");

    assert_eq!(issuer.verify(&stale), Err(AccessTokenError::Expired));
}

#[rstest]
fn tampered_token_is_invalid(issuer: AccessTokenIssuer<DefaultClock>) {
    let token = issuer.issue(AccountId::new()).expect("issuance succeeds");
    let tampered = format!("{}x", token.token);

    assert_eq!(issuer.verify(&tampered), Err(AccessTokenError::Invalid));
    assert_eq!(
        issuer.verify("not-a-jwt-at-all"),
        Err(AccessTokenError::Invalid)
    );
}

#[rstest]
fn foreign_signature_is_invalid(issuer: AccessTokenIssuer<DefaultClock>) {
    let foreign = AccessTokenIssuer::new(
        &AccountSettings {
            token_signing_key: "a-different-key".to_owned(),
            token_expiry_days: 30,
        },
        Arc::new(DefaultClock),
    );
    let token = foreign.issue(AccountId::new()).expect("issuance succeeds");

    assert_eq!(issuer.verify(&token.token), Err(AccessTokenError::Invalid));
}

#[test]
fn bearer_parsing_distinguishes_missing_from_malformed() {
    assert_eq!(
        BearerToken::from_header(None),
        Err(AccessTokenError::HeaderNotFound)
    );
    assert_eq!(
        BearerToken::from_header(Some("Basic abc")),
        Err(AccessTokenError::MalformedHeader)
    );
    assert_eq!(
        BearerToken::from_header(Some("Bearer ")),
        Err(AccessTokenError::MalformedHeader)
    );

    let token = BearerToken::from_header(Some("Bearer abc.def.ghi")).expect("well-formed header");
    assert_eq!(token.as_str(), "abc.def.ghi");
}

#[test]
fn claims_scope_check_rejects_other_accounts() {
    let owner = AccountId::new();
    let claims = AccessTokenClaims {
        account_id: owner,
        exp: 0,
    };

    assert!(claims.ensure_account(owner).is_ok());
    assert_eq!(
        claims.ensure_account(AccountId::new()),
        Err(AccessTokenError::UnauthorizedAccess)
    );
}

mod common;

use serde_json::json;

use signet::{
    AuthError, Claims, CredentialAuthenticator, CredentialBoundJwtStrategy, Credentials,
    LookupAdapter, TokenValidator,
};

use common::*;

fn runtime_claims(value: serde_json::Value) -> Claims {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn adapter() -> SingleUserAdapter {
    SingleUserAdapter {
        identifier: "u".to_string(),
        secret: "p".to_string(),
    }
}

#[tokio::test]
async fn authenticate_returns_token_and_user() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), adapter()).unwrap();

    let auth = strategy
        .authenticate(Credentials::new("u", "p"))
        .await
        .unwrap();

    assert_eq!(auth.user["id"], "1");
    assert_eq!(auth.user["role"], "admin");

    let decoded = strategy.validate(&auth.token).unwrap();
    assert_eq!(decoded["id"], "1");
    assert_eq!(decoded["role"], "admin");
}

#[tokio::test]
async fn wrong_secret_fails_with_invalid_credentials() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), adapter()).unwrap();

    let err = strategy
        .authenticate(Credentials::new("u", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_identifier_fails_with_invalid_credentials() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), adapter()).unwrap();

    let err = strategy
        .authenticate(Credentials::new("nobody", "p"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn runtime_claims_are_signed_alongside_user_fields() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), adapter()).unwrap();

    let auth = strategy
        .authenticate(
            Credentials::new("u", "p")
                .with_runtime_claims(runtime_claims(json!({"session": "s-42", "mfa": true}))),
        )
        .await
        .unwrap();

    let decoded = strategy.validate(&auth.token).unwrap();
    assert_eq!(decoded["session"], "s-42");
    assert_eq!(decoded["mfa"], true);
    assert_eq!(decoded["id"], "1");
}

#[tokio::test]
async fn runtime_claims_cannot_forge_identity() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), adapter()).unwrap();

    let auth = strategy
        .authenticate(
            Credentials::new("u", "p")
                .with_runtime_claims(runtime_claims(json!({"id": "999", "role": "superuser"}))),
        )
        .await
        .unwrap();

    let decoded = strategy.validate(&auth.token).unwrap();
    // The adapter's identity survives; the ordinary field may be overlaid.
    assert_eq!(decoded["id"], "1");
    assert_eq!(decoded["role"], "superuser");
}

#[tokio::test]
async fn adapter_failures_propagate_unchanged() {
    let strategy = CredentialBoundJwtStrategy::new(rsa_config(), FailingAdapter).unwrap();

    let err = strategy
        .authenticate(Credentials::new("u", "p"))
        .await
        .unwrap_err();

    match err {
        AuthError::Adapter(source) => {
            assert_eq!(source.to_string(), "user store unreachable");
        }
        other => panic!("expected Adapter pass-through, got {other:?}"),
    }
}

#[tokio::test]
async fn lookup_adapter_resolves_email_then_username() {
    let store = InMemoryUsers::with_user("admin@example.com", "admin", "hunter2");
    let strategy =
        CredentialBoundJwtStrategy::new(rsa_config(), LookupAdapter::new(store)).unwrap();

    let by_email = strategy
        .authenticate(Credentials::new("admin@example.com", "hunter2"))
        .await
        .unwrap();
    assert_eq!(by_email.user.email, "admin@example.com");

    let by_username = strategy
        .authenticate(Credentials::new("admin", "hunter2"))
        .await
        .unwrap();
    assert_eq!(by_username.user.username, "admin");
}

#[tokio::test]
async fn lookup_adapter_rejects_wrong_password() {
    let store = InMemoryUsers::with_user("admin@example.com", "admin", "hunter2");
    let strategy =
        CredentialBoundJwtStrategy::new(rsa_config(), LookupAdapter::new(store)).unwrap();

    let err = strategy
        .authenticate(Credentials::new("admin", "letmein"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn password_hash_never_reaches_the_token() {
    let store = InMemoryUsers::with_user("admin@example.com", "admin", "hunter2");
    let strategy =
        CredentialBoundJwtStrategy::new(rsa_config(), LookupAdapter::new(store)).unwrap();

    let auth = strategy
        .authenticate(Credentials::new("admin", "hunter2"))
        .await
        .unwrap();

    let decoded = strategy.validate(&auth.token).unwrap();
    assert_eq!(decoded["id"], "1");
    assert_eq!(decoded["role"], "admin");
    assert!(!decoded.contains_key("password_hash"));
}

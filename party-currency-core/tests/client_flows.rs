//! End-to-end flows through `PartyCurrencyContext` against a mock backend
//!
//! Credentials live in a temp directory so the file store is exercised
//! for real; only the backend is mocked.
//!
//! Run with: cargo test --test client_flows -- --nocapture

use std::sync::Arc;

use chrono::{Duration, Utc};
use httpmock::prelude::*;
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;

use party_currency_core::adapters::credentials::FileCredentialStore;
use party_currency_core::config::Config;
use party_currency_core::domain::{CurrencyBreakdown, Denomination, NewVirtualAccount, UserRole};
use party_currency_core::ports::CredentialStore;
use party_currency_core::{Error, NewEvent, OperationResult, PartyCurrencyContext};

// ============================================================================
// Test Helpers
// ============================================================================

fn context(server: &MockServer, dir: &TempDir) -> PartyCurrencyContext {
    let mut config = Config::default();
    config.base_url = server.base_url();
    config.location_base_url = server.base_url();
    let store = FileCredentialStore::with_token_duration(dir.path(), config.token_duration_days).unwrap();
    PartyCurrencyContext::with_credentials(config, Arc::new(store)).unwrap()
}

fn credentials_file(dir: &TempDir) -> Option<JsonValue> {
    let content = std::fs::read_to_string(dir.path().join("credentials.json")).ok()?;
    serde_json::from_str(&content).ok()
}

fn sample_event() -> NewEvent {
    NewEvent {
        event_name: "Ada's 30th".to_string(),
        event_description: "Birthday".to_string(),
        street_address: "1 Marina".to_string(),
        city: "Lagos".to_string(),
        state: "Lagos".to_string(),
        lga: "Eti-Osa".to_string(),
        postal_code: None,
        start_date: "2026-12-01".to_string(),
        end_date: "2026-12-02".to_string(),
        delivery_address: String::new(),
        reconciliation_service: false,
    }
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_no_token_never_reaches_backend() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!([]));
        })
        .await;

    let err = ctx.event_service.list().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(ctx.profile_service.get_profile().await.unwrap_err().is_unauthenticated());
    assert!(ctx.admin_service.users().await.unwrap_err().is_unauthenticated());

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_login_stores_role_from_profile() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({"email": "shop@example.com", "password": "Secret123!"}));
            then.status(200).json_body(json!({"token": "tok-1"}));
        })
        .await;
    let profile = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/profile")
                .header("Authorization", "Token tok-1");
            then.status(200).json_body(json!({
                "type": "Merchant:Caterer",
                "email": "shop@example.com",
                "firstname": "Tola"
            }));
        })
        .await;

    let outcome = ctx
        .auth_service
        .login("shop@example.com", "Secret123!", true)
        .await
        .unwrap();

    profile.assert_async().await;
    assert_eq!(outcome.role, UserRole::Merchant);

    let stored = ctx.credentials.get().unwrap();
    assert_eq!(stored.access_token.as_deref(), Some("tok-1"));
    assert_eq!(stored.role, Some(UserRole::Merchant));

    let file = credentials_file(&dir).unwrap();
    assert_eq!(file["accessToken"], "tok-1");
    assert_eq!(file["userType"], "merchant");
}

#[tokio::test]
async fn test_login_discards_token_when_profile_fails() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(json!({"token": "tok-1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/profile");
            then.status(500).body("boom");
        })
        .await;

    let err = ctx
        .auth_service
        .login("ada@example.com", "Secret123!", true)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!ctx.credentials.get().unwrap().is_authenticated());
}

#[tokio::test]
async fn test_session_login_is_never_written_to_disk() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(json!({"token": "session-tok"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/profile");
            then.status(200).json_body(json!({"type": "User"}));
        })
        .await;

    ctx.auth_service
        .login("ada@example.com", "Secret123!", false)
        .await
        .unwrap();

    // Usable in this process
    assert_eq!(
        ctx.credentials.get().unwrap().access_token.as_deref(),
        Some("session-tok")
    );

    let on_disk = std::fs::read_to_string(dir.path().join("credentials.json")).unwrap_or_default();
    assert!(!on_disk.contains("session-tok"));

    // A fresh process sees no token
    let fresh = context(&server, &dir);
    assert!(!fresh.credentials.get().unwrap().is_authenticated());
}

#[tokio::test]
async fn test_expired_token_reads_as_absent() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let expired = json!({
        "accessToken": "old",
        "expiresAt": (Utc::now() - Duration::days(1)).to_rfc3339(),
        "userType": "customer"
    });
    std::fs::write(dir.path().join("credentials.json"), expired.to_string()).unwrap();

    let ctx = context(&server, &dir);
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!([]));
        })
        .await;

    let stored = ctx.credentials.get().unwrap();
    assert!(stored.access_token.is_none());
    assert_eq!(stored.role, Some(UserRole::Customer));
    assert!(ctx.event_service.list().await.unwrap_err().is_unauthenticated());
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);

    ctx.credentials.store("tok", UserRole::Admin, true).unwrap();
    ctx.auth_service.logout().unwrap();

    let stored = ctx.credentials.get().unwrap();
    assert!(stored.access_token.is_none());
    assert!(stored.role.is_none());
}

// ============================================================================
// Responses
// ============================================================================

#[tokio::test]
async fn test_error_payload_passed_through_verbatim() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Customer, true).unwrap();

    let payload = json!({"event_name": ["This field is required."], "LGA": ["Invalid LGA"]});
    let body = payload.clone();
    server
        .mock_async(move |when, then| {
            when.method(POST).path("/events/create");
            then.status(400).json_body(body);
        })
        .await;

    let err = ctx.event_service.create(&sample_event()).await.unwrap_err();
    match &err {
        Error::RequestFailed { status, payload: got } => {
            assert_eq!(*status, 400);
            assert_eq!(got, &payload);
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }

    let result = OperationResult::<()>::from(Err(err));
    assert!(!result.success);
    let context = result.context.unwrap();
    assert_eq!(context["status"], json!(400));
    assert_eq!(context["payload"], payload);
}

#[tokio::test]
async fn test_success_body_passed_through_unmodified() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Merchant, true).unwrap();

    let body = json!({
        "requestSuccessful": true,
        "responseBody": {"accountReference": "ref-1", "bankName": "Wema", "nested": {"a": [1, 2]}}
    });
    let response = body.clone();
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/merchant/get-active-reserved-account");
            then.status(200).json_body(response);
        })
        .await;

    let account = ctx.merchant_service.get_virtual_account().await.unwrap();
    assert_eq!(account, body);
}

#[tokio::test]
async fn test_merchant_refusal_is_a_failure() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Merchant, true).unwrap();

    server
        .mock_async(|when, then| {
            when.method(POST).path("/merchant/create-reserved-account");
            then.status(200).json_body(json!({
                "requestSuccessful": false,
                "responseMessage": "BVN mismatch"
            }));
        })
        .await;

    let account = NewVirtualAccount {
        event_id: "evt-1".to_string(),
        customer_name: "Tola".to_string(),
        bvn: "12345678901".to_string(),
    };
    let err = ctx
        .merchant_service
        .create_virtual_account(&account)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert_eq!(err.payload().unwrap()["responseMessage"], "BVN mismatch");
}

// ============================================================================
// Request shaping
// ============================================================================

#[tokio::test]
async fn test_event_lga_sent_upper_cased() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Customer, true).unwrap();

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/events/create")
                .header("Authorization", "Token tok")
                .json_body_includes(r#"{"LGA": "ETI-OSA", "event_name": "Ada's 30th"}"#);
            then.status(201).json_body(json!({
                "message": "Event created",
                "event": {"event_id": "evt-9", "event_name": "Ada's 30th", "LGA": "ETI-OSA"}
            }));
        })
        .await;

    let event = ctx.event_service.create(&sample_event()).await.unwrap();
    create.assert_async().await;
    assert_eq!(event.event_id, "evt-9");
}

#[tokio::test]
async fn test_admin_users_accepts_both_shapes() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Admin, true).unwrap();

    let mut wrapped = server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/get-users");
            then.status(200).json_body(json!({
                "users": [{"username": "ada@example.com", "isActive": true}]
            }));
        })
        .await;

    let users = ctx.admin_service.users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username.as_deref(), Some("ada@example.com"));
    assert!(users[0].is_active);

    wrapped.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin/get-users");
            then.status(200).json_body(json!([
                {"username": "a@example.com", "isActive": false},
                {"username": "b@example.com", "isActive": true}
            ]));
        })
        .await;

    let users = ctx.admin_service.users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(!users[0].is_active);
}

#[tokio::test]
async fn test_admin_email_with_hash_addresses_the_whole_email() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Admin, true).unwrap();

    let truncated = server
        .mock_async(|when, then| {
            when.path("/admin/delete-user/a");
            then.status(200).json_body(json!({"message": "deleted a"}));
        })
        .await;
    let whole = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path_includes("/admin/delete-user/")
                .path_includes("example.com");
            then.status(200)
                .json_body(json!({"message": "deleted a#b@example.com"}));
        })
        .await;

    let response = ctx.admin_service.delete_user("a#b@example.com").await.unwrap();

    assert_eq!(response.message.as_deref(), Some("deleted a#b@example.com"));
    truncated.assert_hits_async(0).await;
    whole.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_event_id_with_query_characters_stays_in_path() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Customer, true).unwrap();

    let truncated = server
        .mock_async(|when, then| {
            when.path("/events/get/E1");
            then.status(200)
                .json_body(json!({"event": {"event_id": "E1", "event_name": "wrong"}}));
        })
        .await;
    let escaped = server
        .mock_async(|when, then| {
            when.method(GET)
                .path_includes("/events/get/E1")
                .path_includes("x");
            then.status(200)
                .json_body(json!({"event": {"event_id": "E1?x=1", "event_name": "right"}}));
        })
        .await;

    let event = ctx.event_service.get("E1?x=1").await.unwrap();

    assert_eq!(event.event_name, "right");
    truncated.assert_hits_async(0).await;
    escaped.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_hand_edited_token_lifetime_does_not_break_login() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        json!({"baseUrl": server.base_url(), "tokenDurationDays": i64::MAX}).to_string(),
    )
    .unwrap();

    let ctx = PartyCurrencyContext::new(dir.path()).unwrap();
    assert_eq!(ctx.config.token_duration_days, 14);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(json!({"token": "tok-long"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/profile");
            then.status(200).json_body(json!({"type": "Customer", "email": "ada@example.com"}));
        })
        .await;

    ctx.auth_service
        .login("ada@example.com", "Secret123!", true)
        .await
        .unwrap();

    let stored = ctx.credentials.get().unwrap();
    assert_eq!(stored.access_token.as_deref(), Some("tok-long"));
    let days = (stored.expires_at.unwrap() - Utc::now()).num_days();
    assert!((13..=14).contains(&days));
}

#[tokio::test]
async fn test_transaction_amount_is_a_json_number() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir);
    ctx.credentials.store("tok", UserRole::Customer, true).unwrap();

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/payments/create-transaction")
                .json_body(json!({
                    "event_id": "evt-1",
                    "amount": 1600,
                    "currency": {"200": 3, "500": 2, "1000": 0}
                }));
            then.status(200).json_body(json!({"payment_reference": "PR-1"}));
        })
        .await;

    let breakdown = CurrencyBreakdown::new()
        .with(Denomination::N200, 3)
        .with(Denomination::N500, 2);
    let transaction = ctx
        .payment_service
        .create_transaction("evt-1", &breakdown)
        .await
        .unwrap();

    create.assert_hits_async(1).await;
    assert_eq!(transaction.payment_reference, "PR-1");
}

//! Integration tests for order creation and webhook reconciliation.
//!
//! Uses the real Stripe adapter for webhook signature verification (it runs
//! offline) and drives the full router: create a pending order with an
//! attached payment intent, then deliver signed `payment_intent.succeeded`
//! events and watch the order transition to paid.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use serde_json::{json, Value};
use sha2::Sha256;
use tower::util::ServiceExt;

use crispai::adapters::auth::{Argon2Config, Argon2PasswordHasher, JwtTokenService};
use crispai::adapters::http::{api_router, AppState};
use crispai::adapters::memory::{InMemoryAccountRepository, InMemoryOrderRepository};
use crispai::adapters::stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};

const WEBHOOK_SECRET: &str = "whsec_integration_secret";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn test_app() -> Router {
    let config = StripeConfig::new("sk_test_integration", WEBHOOK_SECRET);
    api_router(AppState {
        account_repository: Arc::new(InMemoryAccountRepository::new()),
        order_repository: Arc::new(InMemoryOrderRepository::new()),
        payment_provider: Arc::new(StripePaymentAdapter::new(config)),
        password_hasher: Arc::new(Argon2PasswordHasher::new(Argon2Config::fast())),
        token_service: Arc::new(JwtTokenService::new(
            &SecretString::new("integration-test-secret".to_string()),
            3600,
        )),
        currency: "usd".to_string(),
    })
}

fn sign(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    let digest = mac.finalize().into_bytes();
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("t={},v1={}", timestamp, hex)
}

fn succeeded_event(intent_id: &str, amount_minor: i64) -> String {
    json!({
        "id": format!("evt_{}", intent_id),
        "type": "payment_intent.succeeded",
        "created": chrono::Utc::now().timestamp(),
        "data": {
            "object": {
                "id": intent_id,
                "object": "payment_intent",
                "amount": amount_minor,
                "currency": "usd",
                "status": "succeeded"
            }
        }
    })
    .to_string()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn deliver_webhook(app: &Router, payload: &str, signature: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/stripe")
        .header("Content-Type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("Stripe-Signature", signature);
    }
    let request = builder.body(Body::from(payload.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "username": "jo",
            "password": "correct horse battery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn create_invoice(app: &Router, token: &str, intent_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/orders/invoice",
        Some(token),
        Some(json!({
            "total_amount": "19.99",
            "items": [{"sku": "sop-assistant", "qty": 1}],
            "payment_intent_id": intent_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "invoice failed: {}", body);
    assert_eq!(body["message"], "Order created successfully");
    body["order_id"].as_str().unwrap().to_string()
}

async fn order_status(app: &Router, token: &str, order_id: &str) -> String {
    let (status, body) = send(app, "GET", "/api/orders", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == order_id)
        .unwrap_or_else(|| panic!("order {} not listed", order_id))["status"]
        .as_str()
        .unwrap()
        .to_string()
}

// =============================================================================
// Webhook Reconciliation
// =============================================================================

#[tokio::test]
async fn signed_success_event_marks_the_order_paid() {
    let app = test_app();
    let token = register(&app, "jo@example.com").await;
    let order_id = create_invoice(&app, &token, "pi_test_1").await;

    assert_eq!(order_status(&app, &token, &order_id).await, "pending");

    let payload = succeeded_event("pi_test_1", 1999);
    let signature = sign(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);
    let (status, body) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(order_status(&app, &token, &order_id).await, "paid");
}

#[tokio::test]
async fn redelivered_event_is_acknowledged_and_order_stays_paid() {
    let app = test_app();
    let token = register(&app, "jo@example.com").await;
    let order_id = create_invoice(&app, &token, "pi_test_1").await;

    let payload = succeeded_event("pi_test_1", 1999);
    let signature = sign(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);

    let (first, _) = deliver_webhook(&app, &payload, Some(&signature)).await;
    let (second, body) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(order_status(&app, &token, &order_id).await, "paid");
}

#[tokio::test]
async fn unmatched_intent_is_acknowledged_without_side_effects() {
    let app = test_app();
    let token = register(&app, "jo@example.com").await;
    let order_id = create_invoice(&app, &token, "pi_test_1").await;

    let payload = succeeded_event("pi_unknown", 5000);
    let signature = sign(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);
    let (status, body) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(order_status(&app, &token, &order_id).await, "pending");
}

#[tokio::test]
async fn tampered_payload_is_rejected() {
    let app = test_app();
    let token = register(&app, "jo@example.com").await;
    let order_id = create_invoice(&app, &token, "pi_test_1").await;

    let payload = succeeded_event("pi_test_1", 1999);
    let signature = sign(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);
    let tampered = payload.replace("1999", "1");
    let (status, body) = deliver_webhook(&app, &tampered, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(order_status(&app, &token, &order_id).await, "pending");
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let app = test_app();

    let payload = succeeded_event("pi_test_1", 1999);
    let signature = sign("whsec_wrong_secret", chrono::Utc::now().timestamp(), &payload);
    let (status, _) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_signature_header_is_rejected() {
    let app = test_app();

    let payload = succeeded_event("pi_test_1", 1999);
    let (status, body) = deliver_webhook(&app, &payload, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn stale_event_is_rejected_as_replay() {
    let app = test_app();

    let payload = succeeded_event("pi_test_1", 1999);
    let stale = chrono::Utc::now().timestamp() - 600;
    let signature = sign(WEBHOOK_SECRET, stale, &payload);
    let (status, _) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failure_event_is_acknowledged_and_order_stays_pending() {
    let app = test_app();
    let token = register(&app, "jo@example.com").await;
    let order_id = create_invoice(&app, &token, "pi_test_1").await;

    let payload = json!({
        "id": "evt_failed_1",
        "type": "payment_intent.payment_failed",
        "created": chrono::Utc::now().timestamp(),
        "data": {
            "object": {
                "id": "pi_test_1",
                "object": "payment_intent",
                "amount": 1999,
                "currency": "usd",
                "status": "requires_payment_method"
            }
        }
    })
    .to_string();
    let signature = sign(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);
    let (status, body) = deliver_webhook(&app, &payload, Some(&signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(order_status(&app, &token, &order_id).await, "pending");
}

// =============================================================================
// Payment Intent Creation
// =============================================================================

#[tokio::test]
async fn payment_intent_converts_amount_to_minor_units() {
    let provider = Arc::new(MockPaymentProvider::new());
    let app = api_router(AppState {
        account_repository: Arc::new(InMemoryAccountRepository::new()),
        order_repository: Arc::new(InMemoryOrderRepository::new()),
        payment_provider: provider.clone(),
        password_hasher: Arc::new(Argon2PasswordHasher::new(Argon2Config::fast())),
        token_service: Arc::new(JwtTokenService::new(
            &SecretString::new("integration-test-secret".to_string()),
            3600,
        )),
        currency: "usd".to_string(),
    });
    let token = register(&app, "jo@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/payment-intent",
        Some(&token),
        Some(json!({"amount": "19.99"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["client_secret"].is_string());
    assert!(body["payment_intent_id"].as_str().unwrap().starts_with("pi_"));

    let requests = provider.intent_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_minor, 1999);
    assert_eq!(requests[0].currency, "usd");
}

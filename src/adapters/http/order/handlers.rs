//! HTTP handlers for order endpoints.
//!
//! The webhook endpoint is the only unauthenticated one; deliveries are
//! authenticated by signature instead, inside the application handler.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::OrderApiError;
use crate::adapters::http::extract::AuthenticatedAccount;
use crate::adapters::http::state::AppState;
use crate::application::handlers::order::{
    CreateInvoiceCommand, CreatePaymentIntentCommand, HandlePaymentWebhookCommand,
    ListOrdersQuery,
};
use crate::domain::order::OrderError;

use super::dto::{
    CreateInvoiceRequest, CreatePaymentIntentRequest, InvoiceResponse, OrderListResponse,
    OrderResponse, PaymentIntentResponse, WebhookAckResponse,
};

/// GET /api/orders - List the authenticated account's orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
) -> Result<impl IntoResponse, OrderApiError> {
    let handler = state.list_orders_handler();
    let orders = handler
        .handle(ListOrdersQuery {
            account_id: auth.account_id,
        })
        .await?;

    let response = OrderListResponse {
        orders: orders.iter().map(OrderResponse::from).collect(),
    };
    Ok(Json(response))
}

/// POST /api/orders/payment-intent - Create a payment intent for a cart total
pub async fn create_payment_intent(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, OrderApiError> {
    let handler = state.create_payment_intent_handler();
    let result = handler
        .handle(CreatePaymentIntentCommand {
            account_id: auth.account_id,
            amount: request.amount,
            cart_items: request.cart_items,
            order_id: request.order_id,
        })
        .await?;

    Ok(Json(PaymentIntentResponse::from(result)))
}

/// POST /api/orders/invoice - Record a pending order
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, OrderApiError> {
    let handler = state.create_invoice_handler();
    let result = handler
        .handle(CreateInvoiceCommand {
            account_id: auth.account_id,
            total_amount: request.total_amount,
            items: request.items,
            payment_intent_id: request.payment_intent_id,
        })
        .await?;

    let response = InvoiceResponse {
        order_id: result.order.id.to_string(),
        message: "Order created successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/webhooks/stripe - Process a signed Stripe webhook delivery
///
/// Every verified event is acknowledged with the same success body,
/// including redeliveries and events for payment intents this system never
/// tracked; Stripe retries anything else.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, OrderApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(OrderError::invalid_webhook_signature)?;

    let handler = state.webhook_handler();
    handler
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    Ok(Json(WebhookAckResponse::success()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::testing::{seeded_state, test_state};
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::{WebhookEvent, WebhookEventData, WebhookEventType};
    use std::sync::Arc;

    fn auth(account_id: crate::domain::foundation::AccountId) -> AuthenticatedAccount {
        AuthenticatedAccount { account_id }
    }

    #[tokio::test]
    async fn list_orders_returns_empty_history() {
        let (state, account_id) = seeded_state("jo@example.com", "secret-password").await;
        let result = list_orders(State(state), auth(account_id)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_payment_intent_returns_client_secret() {
        let (state, account_id) = seeded_state("jo@example.com", "secret-password").await;

        let result = create_payment_intent(
            State(state),
            auth(account_id),
            Json(CreatePaymentIntentRequest {
                amount: "19.99".parse().unwrap(),
                cart_items: vec![serde_json::json!({"sku": "sop-assistant", "qty": 1})],
                order_id: None,
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn create_invoice_returns_created() {
        let (state, account_id) = seeded_state("jo@example.com", "secret-password").await;

        let result = create_invoice(
            State(state),
            auth(account_id),
            Json(CreateInvoiceRequest {
                total_amount: "49.99".parse().unwrap(),
                items: vec![serde_json::json!({"sku": "sop-assistant", "qty": 1})],
                payment_intent_id: None,
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn webhook_without_signature_header_is_rejected() {
        let state = test_state();
        let result =
            handle_stripe_webhook(State(state), HeaderMap::new(), Bytes::from_static(b"{}"))
                .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn scripted_webhook_event_is_acknowledged() {
        let provider = Arc::new(MockPaymentProvider::new());
        provider.set_webhook_event(WebhookEvent {
            id: "evt_1".to_string(),
            event_type: WebhookEventType::PaymentIntentSucceeded,
            data: WebhookEventData::PaymentIntent {
                intent_id: "pi_untracked".to_string(),
                amount_minor: 1999,
                currency: "usd".to_string(),
            },
            created_at: 1_704_067_200,
        });
        let state = AppState {
            payment_provider: provider,
            ..test_state()
        };

        let mut headers = HeaderMap::new();
        headers.insert("Stripe-Signature", "t=1,v1=ab".parse().unwrap());

        let result = handle_stripe_webhook(State(state), headers, Bytes::from_static(b"{}")).await;
        assert!(result.is_ok());
    }
}

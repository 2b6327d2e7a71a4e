//! Axum router configuration for order endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_invoice, create_payment_intent, handle_stripe_webhook, list_orders};

/// Create the order API router, mounted under `/api`.
///
/// # Routes
///
/// ## Authenticated
/// - `GET /orders` - List the account's orders, newest first
/// - `POST /orders/payment-intent` - Create a payment intent for a cart total
/// - `POST /orders/invoice` - Record a pending order
///
/// ## Webhook (no auth, signature verified)
/// - `POST /webhooks/stripe` - Process Stripe webhook deliveries
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/payment-intent", post(create_payment_intent))
        .route("/orders/invoice", post(create_invoice))
        .route("/webhooks/stripe", post(handle_stripe_webhook))
}

//! Request and response DTOs for order endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::order::CreatePaymentIntentResult;
use crate::domain::foundation::OrderId;
use crate::domain::order::Order;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Cart total in major currency units, e.g. `19.99`.
    pub amount: Decimal,
    #[serde(default)]
    pub cart_items: Vec<serde_json::Value>,
    /// Pending order to match the intent to, if one was created up front.
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Order total in major currency units.
    pub total_amount: Decimal,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

impl From<CreatePaymentIntentResult> for PaymentIntentResponse {
    fn from(result: CreatePaymentIntentResult) -> Self {
        Self {
            client_secret: result.client_secret,
            payment_intent_id: result.payment_intent_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub order_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub total_amount: Decimal,
    pub status: String,
    pub stripe_payment_intent_id: Option<String>,
    pub items: Vec<serde_json::Value>,
    pub created_at: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            total_amount: order.total_amount,
            status: order.status.as_str().to_string(),
            stripe_payment_intent_id: order.stripe_payment_intent_id.clone(),
            items: order.items.clone(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

/// Acknowledgement body for webhook deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAckResponse {
    pub status: String,
}

impl WebhookAckResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment processor integration (Stripe in
//! production). The processor is the authority for monetary state: customers,
//! subscriptions, payment intents, and signed webhook events.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::account::SubscriptionStatus;
use crate::domain::foundation::{AccountId, DomainError};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a customer in the payment system.
    ///
    /// Returns the provider's customer ID for future reference.
    async fn create_customer(&self, request: CreateCustomerRequest)
        -> Result<Customer, PaymentError>;

    /// Create a subscription for a customer, with an optional trial period.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError>;

    /// Create a payment intent for a one-off order.
    ///
    /// `amount_minor` is in minor currency units (integer cents).
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns the parsed event if valid, error if the signature does not
    /// match or the payload is not a well-formed event envelope.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer email address.
    pub email: String,

    /// Customer display name.
    pub name: String,
}

/// Customer in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID.
    pub id: String,

    /// Customer email.
    pub email: String,
}

/// Request to create a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Provider's customer ID.
    pub customer_id: String,

    /// Provider price ID for the plan.
    pub price_id: String,

    /// Trial period length in days, if any.
    pub trial_period_days: Option<u32>,
}

/// Subscription in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider's subscription ID.
    pub id: String,

    /// Provider's customer ID.
    pub customer_id: String,

    /// Current subscription status as reported by the provider.
    pub status: SubscriptionStatus,

    /// When the trial ends (Unix timestamp), if trialing.
    pub trial_end: Option<i64>,
}

/// Request to create a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor currency units (integer cents).
    pub amount_minor: i64,

    /// ISO currency code (e.g. "usd").
    pub currency: String,

    /// Requesting account, stored as provider metadata for reconciliation.
    pub account_id: AccountId,

    /// Opaque metadata attached to the intent (e.g. serialized cart items).
    pub metadata: HashMap<String, String>,
}

/// Payment intent in the payment system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's payment intent ID.
    pub id: String,

    /// Client-side secret used by the frontend to confirm the payment.
    pub client_secret: String,
}

/// Webhook event from the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Event payload.
    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Types of webhook events we recognize.
///
/// Unknown types are carried through so the reconciler can acknowledge them
/// without failing; the processor adds event types over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// A payment intent succeeded ("payment succeeded" notification).
    PaymentIntentSucceeded,

    /// A payment intent failed.
    PaymentIntentFailed,

    /// Unknown event type, preserved verbatim.
    Unknown(String),
}

/// Webhook event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Payment intent data.
    #[serde(rename = "payment_intent")]
    PaymentIntent {
        intent_id: String,
        amount_minor: i64,
        currency: String,
    },

    /// Raw/unknown event data.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message. For provider errors this is the provider's
    /// message verbatim, which handlers surface to the caller.
    pub message: String,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a provider API error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Create an invalid signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidSignature, message)
    }

    /// Create an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidPayload, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        use crate::domain::foundation::ErrorCode;

        let code = match err.code {
            PaymentErrorCode::InvalidSignature | PaymentErrorCode::InvalidPayload => {
                ErrorCode::ValidationFailed
            }
            _ => ErrorCode::ExternalServiceError,
        };

        DomainError::new(code, err.message)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Webhook signature did not verify.
    InvalidSignature,

    /// Webhook payload was not a well-formed event envelope.
    InvalidPayload,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::InvalidSignature => "invalid_signature",
            PaymentErrorCode::InvalidPayload => "invalid_payload",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

//! Mock payment provider for testing.
//!
//! Configurable implementation of `PaymentProvider` for unit and integration
//! tests. Supports pre-configured responses, error injection, and webhook
//! event simulation without signature verification.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::account::SubscriptionStatus;
use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentIntent, PaymentProvider, Subscription, WebhookEvent, WebhookEventData,
    WebhookEventType,
};

use super::webhook_types::{StripePaymentIntent, StripeWebhookEvent};

/// Mock payment provider for testing.
///
/// Generates sequential provider ids (`cus_mock_1`, `sub_mock_1`,
/// `pi_mock_1`, ...) and accepts any webhook signature, parsing the payload
/// as a regular Stripe event envelope.
#[derive(Default)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Sequence counter for generated ids.
    sequence: u64,

    /// Status reported for created subscriptions.
    subscription_status: Option<SubscriptionStatus>,

    /// Trial end reported for created subscriptions.
    trial_end: Option<i64>,

    /// Error to return on the next call, any method.
    next_error: Option<PaymentError>,

    /// Scripted webhook event, returned instead of parsing the payload.
    next_webhook_event: Option<WebhookEvent>,

    /// When set, all webhook verifications fail.
    reject_webhooks: bool,

    /// Requests seen by `create_payment_intent`, for assertions.
    intent_requests: Vec<CreatePaymentIntentRequest>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    /// Set the status reported for created subscriptions (default trialing).
    pub fn set_subscription_status(&self, status: SubscriptionStatus) {
        self.inner.lock().unwrap().subscription_status = Some(status);
    }

    /// Set the trial end reported for created subscriptions.
    pub fn set_trial_end(&self, trial_end: Option<i64>) {
        self.inner.lock().unwrap().trial_end = trial_end;
    }

    /// Inject an error for the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set the webhook event to return on verification.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Payment intent requests seen so far.
    pub fn intent_requests(&self) -> Vec<CreatePaymentIntentRequest> {
        self.inner.lock().unwrap().intent_requests.clone()
    }

    fn take_error(&self) -> Option<PaymentError> {
        self.inner.lock().unwrap().next_error.take()
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.inner.lock().unwrap();
        state.sequence += 1;
        format!("{}_mock_{}", prefix, state.sequence)
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        Ok(Customer {
            id: self.next_id("cus"),
            email: request.email,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        let state = self.inner.lock().unwrap();
        let status = state
            .subscription_status
            .clone()
            .unwrap_or(SubscriptionStatus::Trialing);
        let trial_end = state.trial_end;
        drop(state);

        Ok(Subscription {
            id: self.next_id("sub"),
            customer_id: request.customer_id,
            status,
            trial_end,
        })
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.inner
            .lock()
            .unwrap()
            .intent_requests
            .push(request.clone());
        let id = self.next_id("pi");
        Ok(PaymentIntent {
            client_secret: format!("{}_secret", id),
            id,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let state = self.inner.lock().unwrap();
        if state.reject_webhooks {
            return Err(PaymentError::invalid_signature("Invalid signature"));
        }
        if let Some(event) = state.next_webhook_event.clone() {
            return Ok(event);
        }
        drop(state);

        // No scripted event: parse the payload like the real adapter, minus
        // the signature check.
        let envelope: StripeWebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_payload(format!("Invalid JSON: {}", e)))?;

        let event_type = match envelope.event_type.as_str() {
            "payment_intent.succeeded" => WebhookEventType::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentIntentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = if envelope.event_type.starts_with("payment_intent.") {
            let intent: StripePaymentIntent = serde_json::from_value(envelope.data.object.clone())
                .map_err(|e| {
                    PaymentError::invalid_payload(format!("Invalid payment intent: {}", e))
                })?;
            WebhookEventData::PaymentIntent {
                intent_id: intent.id,
                amount_minor: intent.amount,
                currency: intent.currency,
            }
        } else {
            WebhookEventData::Raw {
                json: serde_json::to_string(&envelope.data.object).unwrap_or_default(),
            }
        };

        Ok(WebhookEvent {
            id: envelope.id,
            event_type,
            data,
            created_at: envelope.created,
        })
    }
}

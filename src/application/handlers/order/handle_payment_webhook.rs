//! HandlePaymentWebhookHandler - Command handler for payment webhooks.
//!
//! This is the order reconciler: it maps processor webhook events onto order
//! status. Only "payment succeeded" events drive the `pending` to `paid`
//! transition; every other event type is acknowledged untouched so
//! new processor event types never fail the request.
//!
//! An event for a payment intent we do not track is acknowledged rather than
//! rejected - the processor also notifies us about payments that were never
//! matched to an order here, and about orders already reconciled by an
//! earlier delivery. Both cases are logged for observability.

use std::sync::Arc;

use crate::domain::order::OrderError;
use crate::ports::{
    MarkPaidOutcome, OrderRepository, PaymentErrorCode, PaymentProvider, WebhookEventData,
    WebhookEventType,
};

/// Command to process a signed webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload bytes, exactly as received.
    pub payload: Vec<u8>,
    /// Signature header accompanying the delivery.
    pub signature: String,
}

/// Result of webhook processing. All variants are acknowledged with the same
/// success response; they differ only for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// An order transitioned from `pending` to `paid`.
    OrderMarkedPaid { order_id: String },
    /// Redelivery: the matched order was already `paid` or further along.
    AlreadyReconciled { order_id: String },
    /// No order is matched to the event's payment intent id.
    UnmatchedPaymentIntent { intent_id: String },
    /// Event type carries no action for this backend.
    Acknowledged,
}

/// Handler for processing payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    repository: Arc<dyn OrderRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, OrderError> {
        // 1. Verify signature and parse the event envelope. Both failure
        //    modes are 400-class rejections, never crashes.
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| match e.code {
                PaymentErrorCode::InvalidPayload => OrderError::malformed_webhook(e.message),
                _ => OrderError::invalid_webhook_signature(),
            })?;

        // 2. Only payment success drives a transition.
        match event.event_type {
            WebhookEventType::PaymentIntentSucceeded => {
                let intent_id = match &event.data {
                    WebhookEventData::PaymentIntent { intent_id, .. } => intent_id.clone(),
                    _ => {
                        return Err(OrderError::malformed_webhook(
                            "payment succeeded event without payment intent data",
                        ))
                    }
                };
                self.apply_payment_succeeded(&event.id, &intent_id).await
            }
            other => {
                tracing::debug!(event_id = %event.id, event_type = ?other, "Webhook acknowledged without action");
                Ok(HandlePaymentWebhookResult::Acknowledged)
            }
        }
    }

    async fn apply_payment_succeeded(
        &self,
        event_id: &str,
        intent_id: &str,
    ) -> Result<HandlePaymentWebhookResult, OrderError> {
        match self
            .repository
            .mark_paid_by_payment_intent(intent_id)
            .await?
        {
            MarkPaidOutcome::Transitioned(order) => {
                tracing::info!(
                    event_id = %event_id,
                    order_id = %order.id,
                    payment_intent_id = %intent_id,
                    "Order marked paid"
                );
                Ok(HandlePaymentWebhookResult::OrderMarkedPaid {
                    order_id: order.id.to_string(),
                })
            }
            MarkPaidOutcome::AlreadyApplied(order) => {
                tracing::info!(
                    event_id = %event_id,
                    order_id = %order.id,
                    status = %order.status,
                    "Webhook redelivery for already-reconciled order"
                );
                Ok(HandlePaymentWebhookResult::AlreadyReconciled {
                    order_id: order.id.to_string(),
                })
            }
            MarkPaidOutcome::NotFound => {
                // Tolerated: the intent may belong to a payment this system
                // never tracked. Logged so lost orders stay visible.
                tracing::warn!(
                    event_id = %event_id,
                    payment_intent_id = %intent_id,
                    "Payment succeeded for unmatched payment intent"
                );
                Ok(HandlePaymentWebhookResult::UnmatchedPaymentIntent {
                    intent_id: intent_id.to_string(),
                })
            }
        }
    }
}

//! Order aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, OrderId, Timestamp, ValidationError};

use super::{OrderError, OrderStatus};

/// A purchase attempt by an account.
///
/// Orders are created in `Pending` and matched to exactly one processor
/// payment intent. They are retained for audit and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub account_id: AccountId,
    /// Total in major currency units, cent-exact.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub stripe_payment_intent_id: Option<String>,
    /// Opaque line items, kept as submitted for reconciliation/audit.
    pub items: Vec<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Create a new pending order.
    pub fn create(
        account_id: AccountId,
        total_amount: Decimal,
        items: Vec<serde_json::Value>,
    ) -> Result<Self, ValidationError> {
        if total_amount <= Decimal::ZERO {
            return Err(ValidationError::not_positive(
                "total_amount",
                total_amount.to_string(),
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::new(),
            account_id,
            total_amount,
            status: OrderStatus::Pending,
            stripe_payment_intent_id: None,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Match this order to its processor payment intent.
    ///
    /// An order is matched to exactly one payment intent; attaching a second
    /// one is rejected.
    pub fn attach_payment_intent(&mut self, intent_id: impl Into<String>) -> Result<(), OrderError> {
        if let Some(existing) = &self.stripe_payment_intent_id {
            return Err(OrderError::validation(
                "stripe_payment_intent_id",
                format!("order already matched to payment intent {}", existing),
            ));
        }
        self.stripe_payment_intent_id = Some(intent_id.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Apply a verified "payment succeeded" event.
    ///
    /// Returns `true` if the order transitioned to `Paid`, `false` if the
    /// event was a redelivery (order already paid or further along) or the
    /// order is terminal. Never an error: webhook reconciliation must be
    /// idempotent.
    pub fn mark_paid(&mut self) -> bool {
        if self.status.can_transition_to(OrderStatus::Paid) {
            self.status = OrderStatus::Paid;
            self.updated_at = Timestamp::now();
            true
        } else {
            false
        }
    }

    /// Begin fulfillment (driven externally, after payment).
    pub fn begin_processing(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Processing)
    }

    /// Finish fulfillment (driven externally).
    pub fn complete(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Completed)
    }

    /// Cancel the order. Allowed from any non-terminal state.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Cancelled)
    }

    fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::invalid_transition(self.status, next));
        }
        self.status = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

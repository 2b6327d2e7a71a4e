//! CreateInvoiceHandler - Command handler for recording an order.
//!
//! Creates a pending order for the account's cart. Payment is settled
//! separately: the frontend confirms the payment intent and the webhook
//! reconciler flips the order to paid.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::foundation::AccountId;
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

/// Command to record a new order.
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    pub account_id: AccountId,
    /// Order total in major currency units.
    pub total_amount: Decimal,
    /// Line items as submitted by the client.
    pub items: Vec<serde_json::Value>,
    /// Payment intent already created for this checkout, if any.
    pub payment_intent_id: Option<String>,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateInvoiceResult {
    pub order: Order,
}

/// Handler for creating orders.
pub struct CreateInvoiceHandler {
    repository: Arc<dyn OrderRepository>,
}

impl CreateInvoiceHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateInvoiceCommand) -> Result<CreateInvoiceResult, OrderError> {
        let mut order = Order::create(cmd.account_id, cmd.total_amount, cmd.items)
            .map_err(|e| OrderError::validation("total_amount", e.to_string()))?;

        if let Some(intent_id) = cmd.payment_intent_id {
            order.attach_payment_intent(intent_id)?;
        }

        self.repository.save(&order).await?;

        tracing::info!(
            order_id = %order.id,
            account_id = %order.account_id,
            total_amount = %order.total_amount,
            "Order created"
        );

        Ok(CreateInvoiceResult { order })
    }
}

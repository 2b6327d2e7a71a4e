//! CreatePaymentIntentHandler - Command handler for checkout intents.
//!
//! Converts the cart total from major units to the integer minor units the
//! processor requires (`19.99` becomes `1999`) and creates the payment
//! intent, tagging it with the account id so webhook reconciliation can find
//! its way back. The client secret returned is what the frontend uses to
//! confirm the payment.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::foundation::{AccountId, OrderId};
use crate::domain::order::OrderError;
use crate::ports::{CreatePaymentIntentRequest, OrderRepository, PaymentProvider};

/// Command to create a payment intent for a cart total.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub account_id: AccountId,
    /// Cart total in major currency units.
    pub amount: Decimal,
    /// Line items as submitted, attached to the intent as metadata.
    pub cart_items: Vec<serde_json::Value>,
    /// When set, the created intent is also matched to this pending order.
    pub order_id: Option<OrderId>,
}

/// Result of payment intent creation.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    pub client_secret: String,
    pub payment_intent_id: String,
}

/// Handler for creating payment intents.
pub struct CreatePaymentIntentHandler {
    repository: Arc<dyn OrderRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    /// ISO currency code all intents are created in.
    currency: String,
}

impl CreatePaymentIntentHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, OrderError> {
        let amount_minor = to_minor_units(cmd.amount)?;

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), cmd.account_id.to_string());
        if !cmd.cart_items.is_empty() {
            let items = serde_json::to_string(&cmd.cart_items)
                .map_err(|e| OrderError::validation("cart_items", e.to_string()))?;
            metadata.insert("cart_items".to_string(), items);
        }

        let intent = self
            .payment_provider
            .create_payment_intent(CreatePaymentIntentRequest {
                amount_minor,
                currency: self.currency.clone(),
                account_id: cmd.account_id,
                metadata,
            })
            .await
            .map_err(|e| OrderError::payment_failed(e.message))?;

        tracing::info!(
            account_id = %cmd.account_id,
            payment_intent_id = %intent.id,
            amount_minor,
            "Payment intent created"
        );

        // Optionally match the intent to an order created up front, so the
        // webhook can reconcile it later.
        if let Some(order_id) = cmd.order_id {
            let mut order = self
                .repository
                .find_by_id(&order_id)
                .await?
                .ok_or(OrderError::NotFound(order_id))?;
            order.attach_payment_intent(&intent.id)?;
            self.repository.update(&order).await?;
        }

        Ok(CreatePaymentIntentResult {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
        })
    }
}

/// Convert a major-unit amount to integer minor units, truncating any
/// sub-cent fraction: `19.99` is `1999`, `10.999` is `1099`.
fn to_minor_units(amount: Decimal) -> Result<i64, OrderError> {
    if amount <= Decimal::ZERO {
        return Err(OrderError::validation(
            "amount",
            "amount must be greater than zero",
        ));
    }
    (amount * Decimal::from(100))
        .trunc()
        .to_i64()
        .ok_or_else(|| OrderError::validation("amount", "amount out of range"))
}

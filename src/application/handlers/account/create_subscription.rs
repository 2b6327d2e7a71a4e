//! CreateSubscriptionHandler - Command handler for subscription creation.
//!
//! This is the subscription reconciler: it maps processor subscription-create
//! responses onto the account record. The account's customer id is
//! established lazily and persisted immediately, so it survives a failed
//! subscription attempt and is reused on retry. Subscription id and status
//! are only written together, after the processor call succeeds.

use std::sync::Arc;

use crate::domain::account::{AccountError, SubscriptionStatus};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::{
    AccountRepository, CreateCustomerRequest, CreateSubscriptionRequest, PaymentProvider,
};

/// Trial period granted on every new subscription.
pub const TRIAL_PERIOD_DAYS: u32 = 7;

/// Command to create a subscription for an account.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub account_id: AccountId,
    /// Processor price id for the chosen plan.
    pub price_id: String,
}

/// Result of subscription creation.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub subscription_id: String,
    pub status: SubscriptionStatus,
}

/// Handler for subscription creation.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn AccountRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateSubscriptionHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, AccountError> {
        if cmd.price_id.is_empty() {
            return Err(AccountError::validation("price_id", "is required"));
        }

        let mut account = self
            .repository
            .find_by_id(&cmd.account_id)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .ok_or(AccountError::NotFound(cmd.account_id))?;

        // Establish the processor customer lazily. The id is persisted before
        // the subscription call: if that call fails, the customer id stays
        // and is reused on retry.
        let customer_id = match &account.stripe_customer_id {
            Some(id) => id.clone(),
            None => {
                let customer = self
                    .payment_provider
                    .create_customer(CreateCustomerRequest {
                        email: account.email.clone(),
                        name: account.username.clone(),
                    })
                    .await
                    .map_err(|e| AccountError::payment_failed(e.message))?;

                account.attach_customer(customer.id.clone());
                self.repository.update(&account).await?;
                customer.id
            }
        };

        let subscription = self
            .payment_provider
            .create_subscription(CreateSubscriptionRequest {
                customer_id,
                price_id: cmd.price_id,
                trial_period_days: Some(TRIAL_PERIOD_DAYS),
            })
            .await
            .map_err(|e| AccountError::payment_failed(e.message))?;

        let trial_ends_at = subscription.trial_end.and_then(Timestamp::from_unix);
        account.record_subscription(
            subscription.id.clone(),
            subscription.status.clone(),
            trial_ends_at,
        );
        self.repository.update(&account).await?;

        tracing::info!(
            account_id = %account.id,
            subscription_id = %subscription.id,
            status = %subscription.status,
            "Subscription created"
        );

        Ok(CreateSubscriptionResult {
            subscription_id: subscription.id,
            status: subscription.status,
        })
    }
}

//! Account aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, Timestamp, ValidationError};

use super::SubscriptionStatus;

/// A registered user of the system.
///
/// Processor-facing fields follow a strict lifecycle: `stripe_customer_id` is
/// assigned lazily on the first subscription attempt and may persist across
/// failed retries; `stripe_subscription_id` and `subscription_status` are
/// written together, only after a successful subscription-create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub trial_ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Register a new account.
    ///
    /// Processor fields start absent; they are only populated by the
    /// subscription reconciler.
    pub fn register(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        let username = username.into();

        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "must contain '@'",
            ));
        }
        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: AccountId::new(),
            email,
            username,
            password_hash: password_hash.into(),
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_status: None,
            trial_ends_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attach the processor customer id created for this account.
    ///
    /// Returns `false` (without overwriting) if a customer id is already
    /// attached; a customer id legitimately persists across retries.
    pub fn attach_customer(&mut self, customer_id: impl Into<String>) -> bool {
        if self.stripe_customer_id.is_some() {
            return false;
        }
        self.stripe_customer_id = Some(customer_id.into());
        self.updated_at = Timestamp::now();
        true
    }

    /// Record a successful subscription-create response from the processor.
    pub fn record_subscription(
        &mut self,
        subscription_id: impl Into<String>,
        status: SubscriptionStatus,
        trial_ends_at: Option<Timestamp>,
    ) {
        self.stripe_subscription_id = Some(subscription_id.into());
        self.subscription_status = Some(status);
        self.trial_ends_at = trial_ends_at;
        self.updated_at = Timestamp::now();
    }

    /// Whether the current subscription status grants feature access.
    pub fn has_subscription_access(&self) -> bool {
        self.subscription_status
            .as_ref()
            .map(SubscriptionStatus::grants_access)
            .unwrap_or(false)
    }
}

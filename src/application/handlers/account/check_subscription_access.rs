//! CheckSubscriptionAccessHandler - Query handler for subscription gating.

use std::sync::Arc;

use crate::domain::account::{status_label, AccountError};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountRepository;

/// Query to check whether an account's subscription grants access.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionAccessQuery {
    pub account_id: AccountId,
}

/// Result of the access check.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionAccessResult {
    pub has_access: bool,
    /// Status label; `"none"` when the account has no subscription.
    pub subscription_status: String,
    pub trial_ends_at: Option<Timestamp>,
}

/// Handler for the subscription access check.
///
/// Access is a pure function of the stored status: `active` and `trialing`
/// grant it, everything else (including no subscription at all) does not.
pub struct CheckSubscriptionAccessHandler {
    repository: Arc<dyn AccountRepository>,
}

impl CheckSubscriptionAccessHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CheckSubscriptionAccessQuery,
    ) -> Result<CheckSubscriptionAccessResult, AccountError> {
        let account = self
            .repository
            .find_by_id(&query.account_id)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .ok_or(AccountError::NotFound(query.account_id))?;

        Ok(CheckSubscriptionAccessResult {
            has_access: account.has_subscription_access(),
            subscription_status: status_label(account.subscription_status.as_ref()).to_string(),
            trial_ends_at: account.trial_ends_at,
        })
    }
}

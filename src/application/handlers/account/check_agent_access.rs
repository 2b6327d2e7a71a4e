//! CheckAgentAccessHandler - Query handler for per-agent access checks.
//!
//! Access to a specific agent is the same subscription predicate; the agent
//! id is opaque to this backend and is echoed back unchanged.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::AccountId;
use crate::ports::AccountRepository;

/// Query to check access to a specific agent.
#[derive(Debug, Clone)]
pub struct CheckAgentAccessQuery {
    pub account_id: AccountId,
    pub agent_id: String,
}

/// Result of the per-agent access check.
#[derive(Debug, Clone)]
pub struct CheckAgentAccessResult {
    pub has_access: bool,
    pub agent_id: String,
}

/// Handler for per-agent access checks.
pub struct CheckAgentAccessHandler {
    repository: Arc<dyn AccountRepository>,
}

impl CheckAgentAccessHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CheckAgentAccessQuery,
    ) -> Result<CheckAgentAccessResult, AccountError> {
        let account = self
            .repository
            .find_by_id(&query.account_id)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .ok_or(AccountError::NotFound(query.account_id))?;

        Ok(CheckAgentAccessResult {
            has_access: account.has_subscription_access(),
            agent_id: query.agent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::account::testing::{test_account, MockAccountRepository};
    use crate::domain::account::SubscriptionStatus;

    #[tokio::test]
    async fn echoes_agent_id_unchanged() {
        let mut account = test_account();
        account.record_subscription("sub_1", SubscriptionStatus::Active, None);
        let id = account.id;

        let handler = CheckAgentAccessHandler::new(MockAccountRepository::with_account(account));
        let result = handler
            .handle(CheckAgentAccessQuery {
                account_id: id,
                agent_id: "sop-assistant".to_string(),
            })
            .await
            .unwrap();

        assert!(result.has_access);
        assert_eq!(result.agent_id, "sop-assistant");
    }

    #[tokio::test]
    async fn uses_same_predicate_as_subscription_access() {
        let account = test_account();
        let id = account.id;

        let handler = CheckAgentAccessHandler::new(MockAccountRepository::with_account(account));
        let result = handler
            .handle(CheckAgentAccessQuery {
                account_id: id,
                agent_id: "sop-assistant".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.has_access);
    }
}

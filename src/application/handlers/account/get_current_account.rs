//! GetCurrentAccountHandler - Query handler for the authenticated account.

use std::sync::Arc;

use crate::domain::account::{Account, AccountError};
use crate::domain::foundation::AccountId;
use crate::ports::AccountRepository;

/// Query for the current account.
#[derive(Debug, Clone)]
pub struct GetCurrentAccountQuery {
    pub account_id: AccountId,
}

/// Handler for fetching the authenticated account.
pub struct GetCurrentAccountHandler {
    repository: Arc<dyn AccountRepository>,
}

impl GetCurrentAccountHandler {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetCurrentAccountQuery) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(&query.account_id)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .ok_or(AccountError::NotFound(query.account_id))
    }
}

//! ListOrdersHandler - Query handler for an account's order history.

use std::sync::Arc;

use crate::domain::foundation::AccountId;
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

/// Query for an account's orders.
#[derive(Debug, Clone)]
pub struct ListOrdersQuery {
    pub account_id: AccountId,
}

/// Handler for listing orders, newest first.
pub struct ListOrdersHandler {
    repository: Arc<dyn OrderRepository>,
}

impl ListOrdersHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListOrdersQuery) -> Result<Vec<Order>, OrderError> {
        Ok(self.repository.list_by_account(&query.account_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::order::testing::MockOrderRepository;

    fn order_for(account_id: AccountId, amount: &str) -> Order {
        Order::create(
            account_id,
            amount.parse().unwrap(),
            vec![serde_json::json!({"sku": "sop-assistant", "qty": 1})],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_only_the_accounts_orders() {
        let account_id = AccountId::new();
        let repo = Arc::new(MockOrderRepository::new());
        repo.save(&order_for(account_id, "10.00")).await.unwrap();
        repo.save(&order_for(account_id, "20.00")).await.unwrap();
        repo.save(&order_for(AccountId::new(), "30.00")).await.unwrap();

        let handler = ListOrdersHandler::new(repo);
        let orders = handler.handle(ListOrdersQuery { account_id }).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.account_id == account_id));
    }

    #[tokio::test]
    async fn empty_history_is_an_empty_list() {
        let handler = ListOrdersHandler::new(Arc::new(MockOrderRepository::new()));
        let orders = handler
            .handle(ListOrdersQuery {
                account_id: AccountId::new(),
            })
            .await
            .unwrap();
        assert!(orders.is_empty());
    }
}

//! In-Memory Order Repository
//!
//! Stores orders in memory with the same conditional paid-transition
//! semantics as the Postgres adapter. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{MarkPaidOutcome, OrderRepository};

/// In-memory storage for orders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored orders.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.account_id == *account_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.stripe_payment_intent_id.as_deref() == Some(intent_id))
            .cloned())
    }

    async fn mark_paid_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<MarkPaidOutcome, DomainError> {
        // The write lock is held for the whole check-and-set, matching the
        // atomicity of the SQL conditional update.
        let mut orders = self.orders.write().await;
        let Some(order) = orders
            .values_mut()
            .find(|o| o.stripe_payment_intent_id.as_deref() == Some(intent_id))
        else {
            return Ok(MarkPaidOutcome::NotFound);
        };

        if order.status == OrderStatus::Pending && order.mark_paid() {
            Ok(MarkPaidOutcome::Transitioned(order.clone()))
        } else {
            Ok(MarkPaidOutcome::AlreadyApplied(order.clone()))
        }
    }
}

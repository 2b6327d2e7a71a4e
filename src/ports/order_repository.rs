//! Order repository port.
//!
//! Persistence contract for the `Order` aggregate. The paid transition is an
//! atomic conditional update keyed by the payment intent id so that webhook
//! redelivery can never double-apply it.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, OrderId};
use crate::domain::order::Order;

/// Outcome of the atomic pending-to-paid transition.
#[derive(Debug, Clone)]
pub enum MarkPaidOutcome {
    /// The order moved from `pending` to `paid`.
    Transitioned(Order),

    /// The order exists but was already past `pending` (webhook redelivery);
    /// nothing changed.
    AlreadyApplied(Order),

    /// No order is matched to this payment intent id.
    NotFound,
}

/// Repository port for Order persistence.
///
/// Orders are retained for audit; there is no delete operation.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save a new order.
    async fn save(&self, order: &Order) -> Result<(), DomainError>;

    /// Update an existing order.
    async fn update(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its ID.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// List an account's orders, newest first.
    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, DomainError>;

    /// Find the order matched to a payment intent id.
    async fn find_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<Option<Order>, DomainError>;

    /// Atomically transition the order matched to `intent_id` from `pending`
    /// to `paid`.
    ///
    /// Must be a single conditional write (e.g. `UPDATE ... WHERE
    /// stripe_payment_intent_id = $1 AND status = 'pending'`) so concurrent
    /// deliveries of the same event cannot race.
    async fn mark_paid_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<MarkPaidOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrderRepository) {}
    }
}

//! PostgreSQL implementation of OrderRepository.
//!
//! The pending-to-paid transition is a single conditional UPDATE keyed by the
//! payment intent id, so concurrent webhook deliveries cannot double-apply it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{MarkPaidOutcome, OrderRepository};

/// PostgreSQL implementation of the OrderRepository port.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgresOrderRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    account_id: Uuid,
    total_amount: Decimal,
    status: String,
    stripe_payment_intent_id: Option<String>,
    items: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid order status value: {}", row.status),
            )
        })?;

        let items = match row.items {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };

        Ok(Order {
            id: OrderId::from_uuid(row.id),
            account_id: AccountId::from_uuid(row.account_id),
            total_amount: row.total_amount,
            status,
            stripe_payment_intent_id: row.stripe_payment_intent_id,
            items,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, account_id, total_amount, status, stripe_payment_intent_id,
           items, created_at, updated_at
    FROM orders
"#;

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, account_id, total_amount, status, stripe_payment_intent_id,
                items, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.account_id.as_uuid())
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .bind(&order.stripe_payment_intent_id)
        .bind(serde_json::Value::Array(order.items.clone()))
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save order: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                total_amount = $2,
                status = $3,
                stripe_payment_intent_id = $4,
                items = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .bind(&order.stripe_payment_intent_id)
        .bind(serde_json::Value::Array(order.items.clone()))
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update order: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to find order: {}", e))
            })?;

        row.map(Order::try_from).transpose()
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE account_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list orders: {}", e))
        })?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn find_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE stripe_payment_intent_id = $1",
            SELECT_COLUMNS
        ))
        .bind(intent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find order: {}", e))
        })?;

        row.map(Order::try_from).transpose()
    }

    async fn mark_paid_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<MarkPaidOutcome, DomainError> {
        // Conditional update first; exactly one delivery can win the
        // pending-to-paid race.
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            UPDATE orders
            SET status = 'paid', updated_at = NOW()
            WHERE stripe_payment_intent_id = $1 AND status = 'pending'
            RETURNING id, account_id, total_amount, status, stripe_payment_intent_id,
                      items, created_at, updated_at
            "#,
        )
        .bind(intent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to mark order paid: {}", e),
            )
        })?;

        if let Some(row) = row {
            return Ok(MarkPaidOutcome::Transitioned(Order::try_from(row)?));
        }

        // Either the order is past pending (redelivery) or unmatched.
        match self.find_by_payment_intent(intent_id).await? {
            Some(order) => Ok(MarkPaidOutcome::AlreadyApplied(order)),
            None => Ok(MarkPaidOutcome::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, items: serde_json::Value) -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            total_amount: "49.99".parse().unwrap(),
            status: status.to_string(),
            stripe_payment_intent_id: Some("pi_1".to_string()),
            items,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_order() {
        let order =
            Order::try_from(row("paid", serde_json::json!([{"sku": "sop-assistant"}]))).unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn row_with_invalid_status_is_rejected() {
        let result = Order::try_from(row("refunded", serde_json::json!([])));
        assert!(result.is_err());
    }

    #[test]
    fn non_array_items_wrapped_in_list() {
        let order = Order::try_from(row("pending", serde_json::json!({"sku": "x"}))).unwrap();
        assert_eq!(order.items.len(), 1);
    }
}

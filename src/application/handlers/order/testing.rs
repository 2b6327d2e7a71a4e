//! Shared mock ports for order handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    MarkPaidOutcome, OrderRepository, PaymentError, PaymentIntent, PaymentProvider, Subscription,
    WebhookEvent,
};

/// In-memory order repository with the same conditional-update semantics as
/// the Postgres implementation.
pub struct MockOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn with_order(order: Order) -> Arc<Self> {
        let repo = Self::new();
        repo.orders.lock().unwrap().push(order);
        Arc::new(repo)
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(pos) = orders.iter().position(|o| o.id == order.id) {
            orders[pos] = order.clone();
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"))
        }
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == *id)
            .cloned())
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
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
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.stripe_payment_intent_id.as_deref() == Some(intent_id))
            .cloned())
    }

    async fn mark_paid_by_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<MarkPaidOutcome, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders
            .iter_mut()
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

/// Payment provider whose `verify_webhook` returns a scripted outcome and
/// whose `create_payment_intent` records the request it received.
pub struct ScriptedPaymentProvider {
    pub webhook_result: Mutex<Option<Result<WebhookEvent, PaymentError>>>,
    pub last_intent_request: Mutex<Option<CreatePaymentIntentRequest>>,
    pub fail_intent_with: Mutex<Option<String>>,
}

impl ScriptedPaymentProvider {
    pub fn new() -> Self {
        Self {
            webhook_result: Mutex::new(None),
            last_intent_request: Mutex::new(None),
            fail_intent_with: Mutex::new(None),
        }
    }

    pub fn with_webhook_event(event: WebhookEvent) -> Arc<Self> {
        let provider = Self::new();
        *provider.webhook_result.lock().unwrap() = Some(Ok(event));
        Arc::new(provider)
    }

    pub fn with_webhook_error(error: PaymentError) -> Arc<Self> {
        let provider = Self::new();
        *provider.webhook_result.lock().unwrap() = Some(Err(error));
        Arc::new(provider)
    }
}

#[async_trait]
impl PaymentProvider for ScriptedPaymentProvider {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        Ok(Customer {
            id: "cus_scripted".to_string(),
            email: request.email,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        Ok(Subscription {
            id: "sub_scripted".to_string(),
            customer_id: request.customer_id,
            status: crate::domain::account::SubscriptionStatus::Active,
            trial_end: None,
        })
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        if let Some(message) = self.fail_intent_with.lock().unwrap().clone() {
            return Err(PaymentError::provider(message));
        }
        *self.last_intent_request.lock().unwrap() = Some(request);
        Ok(PaymentIntent {
            id: "pi_scripted_0".to_string(),
            client_secret: "pi_scripted_0_secret".to_string(),
        })
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.webhook_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(PaymentError::invalid_signature("no scripted result")))
    }
}

/// A pending order matched to the given payment intent id.
pub fn pending_order_with_intent(intent_id: &str) -> Order {
    let mut order = Order::create(
        AccountId::new(),
        "49.99".parse().unwrap(),
        vec![serde_json::json!({"sku": "sop-assistant", "qty": 1})],
    )
    .unwrap();
    order.attach_payment_intent(intent_id).unwrap();
    order
}

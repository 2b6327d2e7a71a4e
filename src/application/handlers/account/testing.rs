//! Shared mock ports for account handler tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::account::{Account, SubscriptionStatus};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::ports::{
    AccountRepository, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateSubscriptionRequest, Customer, PasswordHasher, PaymentError, PaymentIntent,
    PaymentProvider, Subscription, WebhookEvent,
};

/// In-memory account repository.
pub struct MockAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_account(account: Account) -> Arc<Self> {
        let repo = Self::new();
        repo.accounts.lock().unwrap().push(account);
        Arc::new(repo)
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(pos) = accounts.iter().position(|a| a.id == account.id) {
            accounts[pos] = account.clone();
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::AccountNotFound,
                "Account not found",
            ))
        }
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }
}

/// Deterministic, reversible "hasher" for tests.
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{}", password))
    }
}

/// Scriptable payment provider that counts customer/subscription creations.
pub struct MockPaymentProvider {
    pub customers_created: AtomicU32,
    pub subscriptions_created: AtomicU32,
    pub subscription_status: Mutex<SubscriptionStatus>,
    pub trial_end: Mutex<Option<i64>>,
    pub fail_subscription_with: Mutex<Option<String>>,
    pub last_subscription_request: Mutex<Option<CreateSubscriptionRequest>>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self {
            customers_created: AtomicU32::new(0),
            subscriptions_created: AtomicU32::new(0),
            subscription_status: Mutex::new(SubscriptionStatus::Trialing),
            trial_end: Mutex::new(None),
            fail_subscription_with: Mutex::new(None),
            last_subscription_request: Mutex::new(None),
        }
    }

    pub fn failing_subscriptions(message: &str) -> Self {
        let provider = Self::new();
        *provider.fail_subscription_with.lock().unwrap() = Some(message.to_string());
        provider
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let n = self.customers_created.fetch_add(1, Ordering::SeqCst);
        Ok(Customer {
            id: format!("cus_mock_{}", n),
            email: request.email,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        if let Some(message) = self.fail_subscription_with.lock().unwrap().clone() {
            return Err(PaymentError::provider(message));
        }
        let n = self.subscriptions_created.fetch_add(1, Ordering::SeqCst);
        let customer_id = request.customer_id.clone();
        *self.last_subscription_request.lock().unwrap() = Some(request);
        Ok(Subscription {
            id: format!("sub_mock_{}", n),
            customer_id,
            status: self.subscription_status.lock().unwrap().clone(),
            trial_end: *self.trial_end.lock().unwrap(),
        })
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let _ = request;
        Ok(PaymentIntent {
            id: "pi_mock_0".to_string(),
            client_secret: "pi_mock_0_secret".to_string(),
        })
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        Err(PaymentError::invalid_signature("mock has no webhook secret"))
    }
}

/// Convenience: a registered account with no processor state.
pub fn test_account() -> Account {
    Account::register("jo@example.com", "jo", "hashed:pw").unwrap()
}

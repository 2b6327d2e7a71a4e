//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::account::{
    CheckAgentAccessHandler, CheckSubscriptionAccessHandler, CreateSubscriptionHandler,
    GetCurrentAccountHandler, LoginHandler, RegisterAccountHandler,
};
use crate::application::handlers::order::{
    CreateInvoiceHandler, CreatePaymentIntentHandler, HandlePaymentWebhookHandler,
    ListOrdersHandler,
};
use crate::ports::{
    AccountRepository, OrderRepository, PasswordHasher, PaymentProvider, TokenService,
};

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped ports
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct AppState {
    pub account_repository: Arc<dyn AccountRepository>,
    pub order_repository: Arc<dyn OrderRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_service: Arc<dyn TokenService>,
    /// ISO currency code all payment intents are created in.
    pub currency: String,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn register_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(
            self.account_repository.clone(),
            self.password_hasher.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.account_repository.clone(),
            self.password_hasher.clone(),
        )
    }

    pub fn get_current_account_handler(&self) -> GetCurrentAccountHandler {
        GetCurrentAccountHandler::new(self.account_repository.clone())
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(
            self.account_repository.clone(),
            self.payment_provider.clone(),
        )
    }

    pub fn check_subscription_access_handler(&self) -> CheckSubscriptionAccessHandler {
        CheckSubscriptionAccessHandler::new(self.account_repository.clone())
    }

    pub fn check_agent_access_handler(&self) -> CheckAgentAccessHandler {
        CheckAgentAccessHandler::new(self.account_repository.clone())
    }

    pub fn list_orders_handler(&self) -> ListOrdersHandler {
        ListOrdersHandler::new(self.order_repository.clone())
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(
            self.order_repository.clone(),
            self.payment_provider.clone(),
            self.currency.clone(),
        )
    }

    pub fn create_invoice_handler(&self) -> CreateInvoiceHandler {
        CreateInvoiceHandler::new(self.order_repository.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.order_repository.clone(),
            self.payment_provider.clone(),
        )
    }
}

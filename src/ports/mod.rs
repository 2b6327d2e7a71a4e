//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - payment processor (customers, subscriptions,
//!   payment intents, webhook verification)
//! - `AccountRepository` / `OrderRepository` - relational persistence
//! - `PasswordHasher` - credential hashing
//! - `TokenService` - session token issue/verify

mod account_repository;
mod order_repository;
mod password_hasher;
mod payment_provider;
mod token_service;

pub use account_repository::AccountRepository;
pub use order_repository::{MarkPaidOutcome, OrderRepository};
pub use password_hasher::PasswordHasher;
pub use payment_provider::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription, WebhookEvent,
    WebhookEventData, WebhookEventType,
};
pub use token_service::TokenService;

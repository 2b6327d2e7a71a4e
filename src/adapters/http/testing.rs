//! Shared fixtures for HTTP layer tests.

use std::sync::Arc;

use crate::adapters::auth::{Argon2Config, Argon2PasswordHasher, JwtTokenService};
use crate::adapters::memory::{InMemoryAccountRepository, InMemoryOrderRepository};
use crate::adapters::stripe::MockPaymentProvider;
use crate::application::handlers::account::RegisterAccountCommand;
use crate::domain::foundation::AccountId;
use secrecy::SecretString;

use super::state::AppState;

/// App state wired with in-memory adapters and the mock payment provider.
pub(crate) fn test_state() -> AppState {
    AppState {
        account_repository: Arc::new(InMemoryAccountRepository::new()),
        order_repository: Arc::new(InMemoryOrderRepository::new()),
        payment_provider: Arc::new(MockPaymentProvider::new()),
        password_hasher: Arc::new(Argon2PasswordHasher::new(Argon2Config::fast())),
        token_service: Arc::new(JwtTokenService::new(
            &SecretString::new("test-secret".to_string()),
            3600,
        )),
        currency: "usd".to_string(),
    }
}

/// Test state with one registered account; returns the account's id.
pub(crate) async fn seeded_state(email: &str, password: &str) -> (AppState, AccountId) {
    let state = test_state();
    let result = state
        .register_handler()
        .handle(RegisterAccountCommand {
            email: email.to_string(),
            username: "jo".to_string(),
            password: password.to_string(),
        })
        .await
        .expect("seed account registration");
    (state, result.account.id)
}

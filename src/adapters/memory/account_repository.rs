//! In-Memory Account Repository
//!
//! Stores accounts in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::ports::AccountRepository;

/// In-memory storage for accounts, mirroring the Postgres constraints
/// (unique email).
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Email already registered",
            ));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id) {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                "Account not found",
            ));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_find_by_email() {
        let repo = InMemoryAccountRepository::new();
        let account = Account::register("jo@example.com", "jo", "hash").unwrap();
        repo.save(&account).await.unwrap();

        let found = repo.find_by_email("jo@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, account.id);
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let repo = InMemoryAccountRepository::new();
        repo.save(&Account::register("jo@example.com", "jo", "hash").unwrap())
            .await
            .unwrap();

        let second = Account::register("jo@example.com", "jo2", "hash").unwrap();
        assert!(repo.save(&second).await.is_err());
    }

    #[tokio::test]
    async fn update_unknown_account_errors() {
        let repo = InMemoryAccountRepository::new();
        let account = Account::register("jo@example.com", "jo", "hash").unwrap();
        assert!(repo.update(&account).await.is_err());
    }
}

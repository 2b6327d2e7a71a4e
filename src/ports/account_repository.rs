//! Account repository port.
//!
//! Persistence contract for the `Account` aggregate. Implementations must
//! enforce email uniqueness.

use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::foundation::{AccountId, DomainError};

/// Repository port for Account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Save a new account.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if an account with this email already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, account: &Account) -> Result<(), DomainError>;

    /// Update an existing account.
    ///
    /// Status transitions are single-row read-modify-writes keyed by the
    /// account id, so the subscription reconciler's persisted fields are
    /// never torn under concurrent requests.
    async fn update(&self, account: &Account) -> Result<(), DomainError>;

    /// Find an account by its ID.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Find an account by email. Emails are unique.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;
}

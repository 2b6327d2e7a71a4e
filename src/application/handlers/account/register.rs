//! RegisterAccountHandler - Command handler for account registration.

use std::sync::Arc;

use crate::domain::account::{Account, AccountError};
use crate::ports::{AccountRepository, PasswordHasher};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Result of registration.
#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub account: Account,
}

/// Handler for account registration.
pub struct RegisterAccountHandler {
    repository: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl RegisterAccountHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterAccountCommand,
    ) -> Result<RegisterAccountResult, AccountError> {
        if cmd.password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::validation(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        if self
            .repository
            .find_by_email(&cmd.email)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(AccountError::email_taken(cmd.email));
        }

        let password_hash = self
            .password_hasher
            .hash(&cmd.password)
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        let account = Account::register(cmd.email, cmd.username, password_hash)
            .map_err(|e| AccountError::validation("account", e.to_string()))?;

        self.repository.save(&account).await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(RegisterAccountResult { account })
    }
}

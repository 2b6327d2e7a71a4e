//! LoginHandler - Command handler for credential verification.

use std::sync::Arc;

use crate::domain::account::{Account, AccountError};
use crate::ports::{AccountRepository, PasswordHasher};

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub account: Account,
}

/// Handler for login.
///
/// Returns the same `InvalidCredentials` error for an unknown email and a
/// wrong password, so callers cannot probe which emails are registered.
pub struct LoginHandler {
    repository: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl LoginHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        let account = self
            .repository
            .find_by_email(&cmd.email)
            .await
            .map_err(|e| AccountError::infrastructure(e.to_string()))?
            .ok_or(AccountError::InvalidCredentials)?;

        let valid = self
            .password_hasher
            .verify(&cmd.password, &account.password_hash)
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        if !valid {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(LoginResult { account })
    }
}

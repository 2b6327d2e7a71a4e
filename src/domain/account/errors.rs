//! Account-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EmailTaken | 400 |
//! | InvalidCredentials | 400 |
//! | PaymentFailed | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AccountId, DomainError};

/// Account-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Account was not found.
    NotFound(AccountId),

    /// An account with this email already exists.
    EmailTaken(String),

    /// Email/password pair did not match.
    InvalidCredentials,

    /// The payment processor rejected an operation. The reason carries the
    /// processor's message verbatim.
    PaymentFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl AccountError {
    pub fn not_found(id: AccountId) -> Self {
        AccountError::NotFound(id)
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        AccountError::EmailTaken(email.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        AccountError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            AccountError::NotFound(id) => format!("Account {} not found", id),
            AccountError::EmailTaken(email) => {
                format!("An account with email {} already exists", email)
            }
            AccountError::InvalidCredentials => "Invalid email or password".to_string(),
            AccountError::PaymentFailed { reason } => reason.clone(),
            AccountError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            AccountError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        AccountError::Infrastructure(err.to_string())
    }
}

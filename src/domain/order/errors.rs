//! Order-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | InvalidTransition | 409 |
//! | InvalidWebhookSignature | 400 |
//! | MalformedWebhook | 400 |
//! | PaymentFailed | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |
//!
//! A webhook referencing a payment intent we do not track is deliberately
//! NOT an error; the reconciler acknowledges it (see
//! `HandlePaymentWebhookHandler`).

use crate::domain::foundation::{DomainError, OrderId};

use super::OrderStatus;

/// Order-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Order was not found.
    NotFound(OrderId),

    /// Disallowed status transition.
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Webhook payload could not be parsed as an event envelope.
    MalformedWebhook(String),

    /// The payment processor rejected an operation. The reason carries the
    /// processor's message verbatim.
    PaymentFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl OrderError {
    pub fn not_found(id: OrderId) -> Self {
        OrderError::NotFound(id)
    }

    pub fn invalid_transition(from: OrderStatus, to: OrderStatus) -> Self {
        OrderError::InvalidTransition { from, to }
    }

    pub fn invalid_webhook_signature() -> Self {
        OrderError::InvalidWebhookSignature
    }

    pub fn malformed_webhook(reason: impl Into<String>) -> Self {
        OrderError::MalformedWebhook(reason.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        OrderError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        OrderError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            OrderError::NotFound(id) => format!("Order {} not found", id),
            OrderError::InvalidTransition { from, to } => {
                format!("Cannot transition order from {} to {}", from, to)
            }
            OrderError::InvalidWebhookSignature => "Invalid signature".to_string(),
            OrderError::MalformedWebhook(reason) => format!("Invalid payload: {}", reason),
            OrderError::PaymentFailed { reason } => reason.clone(),
            OrderError::ValidationFailed { field, message } => {
                format!("{}: {}", field, message)
            }
            OrderError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OrderError {}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        OrderError::Infrastructure(err.to_string())
    }
}

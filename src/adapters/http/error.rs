//! API error responses.
//!
//! Every error surfaces as `{"error": "<message>"}` with a status derived
//! from the domain error variant. Processor messages pass through verbatim
//! via the `PaymentFailed` variants.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountError;
use crate::domain::order::OrderError;

/// JSON body for all error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// API error type that converts account errors to HTTP responses.
pub struct AccountApiError(pub AccountError);

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::EmailTaken(_)
            | AccountError::InvalidCredentials
            | AccountError::PaymentFailed { .. }
            | AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AccountError::Infrastructure(message) => {
                tracing::error!(error = %message, "Account request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.0.message()))).into_response()
    }
}

/// API error type that converts order errors to HTTP responses.
pub struct OrderApiError(pub OrderError);

impl From<OrderError> for OrderApiError {
    fn from(err: OrderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::InvalidTransition { .. } => StatusCode::CONFLICT,
            OrderError::InvalidWebhookSignature
            | OrderError::MalformedWebhook(_)
            | OrderError::PaymentFailed { .. }
            | OrderError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            OrderError::Infrastructure(message) => {
                tracing::error!(error = %message, "Order request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.0.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccountId, OrderId};
    use crate::domain::order::OrderStatus;

    #[test]
    fn account_not_found_maps_to_404() {
        let response = AccountApiError(AccountError::not_found(AccountId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_credentials_maps_to_400() {
        let response = AccountApiError(AccountError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn account_payment_failure_maps_to_400() {
        let response =
            AccountApiError(AccountError::payment_failed("No such price: 'price_xyz'"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn account_infrastructure_maps_to_500() {
        let response =
            AccountApiError(AccountError::infrastructure("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn order_not_found_maps_to_404() {
        let response = OrderApiError(OrderError::not_found(OrderId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let response = OrderApiError(OrderError::invalid_transition(
            OrderStatus::Completed,
            OrderStatus::Paid,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn webhook_signature_failure_maps_to_400() {
        let response = OrderApiError(OrderError::invalid_webhook_signature()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_webhook_maps_to_400() {
        let response = OrderApiError(OrderError::malformed_webhook("bad json")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn order_infrastructure_maps_to_500() {
        let response =
            OrderApiError(OrderError::infrastructure("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

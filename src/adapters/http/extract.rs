//! Request extractors for the HTTP layer.
//!
//! `AuthenticatedAccount` pulls the Bearer token from the Authorization
//! header and verifies it through the `TokenService` port, so handlers never
//! see the token format.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::foundation::AccountId;

use super::state::AppState;
use super::ErrorResponse;

/// The account a request was authenticated as.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No Bearer token was provided.
    MissingToken,
    /// The token was expired, tampered, or otherwise unverifiable.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> axum::response::Response {
        let message = match self {
            AuthRejection::MissingToken => "Authentication required",
            AuthRejection::InvalidToken => "Invalid or expired token",
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
    }
}

impl axum::extract::FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or(AuthRejection::MissingToken)?;

            let account_id = state
                .token_service
                .verify(token)
                .map_err(|_| AuthRejection::InvalidToken)?;

            Ok(AuthenticatedAccount { account_id })
        })
    }
}

//! HTTP handlers for account endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::AccountApiError;
use crate::adapters::http::extract::AuthenticatedAccount;
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    CheckAgentAccessQuery, CheckSubscriptionAccessQuery, CreateSubscriptionCommand,
    GetCurrentAccountQuery, LoginCommand, RegisterAccountCommand,
};
use crate::domain::account::AccountError;

use super::dto::{
    AccountResponse, AgentAccessResponse, AuthResponse, CreateSubscriptionRequest, LoginRequest,
    MessageResponse, RegisterRequest, SubscriptionAccessResponse, SubscriptionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Auth Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.register_handler();
    let result = handler
        .handle(RegisterAccountCommand {
            email: request.email,
            username: request.username,
            password: request.password,
        })
        .await?;

    let token = state
        .token_service
        .issue(&result.account.id)
        .map_err(|e| AccountError::infrastructure(e.to_string()))?;

    let response = AuthResponse {
        token,
        user: AccountResponse::from(&result.account),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Verify credentials and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.login_handler();
    let result = handler
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    let token = state
        .token_service
        .issue(&result.account.id)
        .map_err(|e| AccountError::infrastructure(e.to_string()))?;

    let response = AuthResponse {
        token,
        user: AccountResponse::from(&result.account),
    };
    Ok(Json(response))
}

/// POST /api/auth/logout - End the session
///
/// Tokens are stateless; the server has nothing to revoke. The endpoint
/// exists so clients have a uniform logout call.
pub async fn logout(
    _auth: AuthenticatedAccount,
) -> Result<impl IntoResponse, AccountApiError> {
    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /api/auth/user - Get the authenticated account
pub async fn get_current_account(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.get_current_account_handler();
    let account = handler
        .handle(GetCurrentAccountQuery {
            account_id: auth.account_id,
        })
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Subscription Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/subscription - Create a subscription with a 7-day trial
pub async fn create_subscription(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.create_subscription_handler();
    let result = handler
        .handle(CreateSubscriptionCommand {
            account_id: auth.account_id,
            price_id: request.price_id,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(result)))
}

/// GET /api/subscription/access - Check whether the subscription grants access
pub async fn check_subscription_access(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.check_subscription_access_handler();
    let result = handler
        .handle(CheckSubscriptionAccessQuery {
            account_id: auth.account_id,
        })
        .await?;

    Ok(Json(SubscriptionAccessResponse::from(result)))
}

/// GET /api/agents/{agent_id}/access - Check access to a specific agent
pub async fn check_agent_access(
    State(state): State<AppState>,
    auth: AuthenticatedAccount,
    Path(agent_id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError> {
    let handler = state.check_agent_access_handler();
    let result = handler
        .handle(CheckAgentAccessQuery {
            account_id: auth.account_id,
            agent_id,
        })
        .await?;

    Ok(Json(AgentAccessResponse::from(result)))
}

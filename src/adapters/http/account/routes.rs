//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    check_agent_access, check_subscription_access, create_subscription, get_current_account,
    login, logout, register,
};

/// Create the account API router, mounted under `/api`.
///
/// # Routes
///
/// ## Auth (no token required)
/// - `POST /auth/register` - Register a new account
/// - `POST /auth/login` - Verify credentials and issue a token
///
/// ## Authenticated
/// - `POST /auth/logout` - End the session
/// - `GET /auth/user` - Get the authenticated account
/// - `POST /subscription` - Create a subscription with a 7-day trial
/// - `GET /subscription/access` - Check subscription access
/// - `GET /agents/{agent_id}/access` - Check access to a specific agent
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/user", get(get_current_account))
        .route("/subscription", post(create_subscription))
        .route("/subscription/access", get(check_subscription_access))
        .route("/agents/:agent_id/access", get(check_agent_access))
}

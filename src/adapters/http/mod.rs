//! HTTP adapters - REST API implementation.
//!
//! Each domain module has its own dto/handlers/routes triple; shared pieces
//! (state, auth extraction, error mapping) live at this level.

pub mod account;
pub mod order;

mod error;
mod extract;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{AccountApiError, ErrorResponse, OrderApiError};
pub use extract::{AuthRejection, AuthenticatedAccount};
pub use state::AppState;

use axum::Router;

use account::account_routes;
use order::order_routes;

/// Create the complete API router.
///
/// All routes live under `/api`; the webhook endpoint is unauthenticated and
/// relies on signature verification instead.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", account_routes().merge(order_routes()))
        .with_state(state)
}

//! Account HTTP adapter - auth, subscription, and access endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;

//! Order HTTP adapter - checkout, order history, and webhook endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::order_routes;

//! In-memory adapters for repository ports.
//!
//! Used by tests and local development; behavior mirrors the Postgres
//! adapters, including the atomic paid transition.

mod account_repository;
mod order_repository;

pub use account_repository::InMemoryAccountRepository;
pub use order_repository::InMemoryOrderRepository;

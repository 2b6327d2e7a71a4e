//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAccountRepository` - accounts with their processor billing state
//! - `PostgresOrderRepository` - orders, including the atomic paid transition

mod account_repository;
mod order_repository;

pub use account_repository::PostgresAccountRepository;
pub use order_repository::PostgresOrderRepository;

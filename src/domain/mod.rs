//! Domain layer - aggregates, value objects, and business rules.
//!
//! Pure logic only; persistence and payment processing live behind ports.

pub mod account;
pub mod foundation;
pub mod order;

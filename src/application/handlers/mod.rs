//! Command/query handlers, one per operation.

pub mod account;
pub mod order;

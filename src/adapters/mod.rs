//! Adapters - Implementations of ports for external systems.
//!
//! - `auth` - Argon2id password hashing and JWT session tokens
//! - `http` - Axum REST API
//! - `memory` - In-memory repositories for tests and local development
//! - `postgres` - PostgreSQL repositories
//! - `stripe` - Stripe payment provider (REST client + webhook verification)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;

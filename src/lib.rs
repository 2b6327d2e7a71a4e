//! Crispai - E-commerce and subscription backend.
//!
//! This crate implements account registration, Stripe-backed subscription
//! management, and order creation with payment-intent/webhook reconciliation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Account domain - users, credentials, and subscription state.
//!
//! The `Account` aggregate owns the processor-facing subscription fields
//! (customer id, subscription id, status, trial expiry). Subscription status
//! is only ever written by the subscription reconciler so that it mirrors the
//! payment processor's last-known value.

mod account;
mod errors;
mod subscription_status;

pub use account::Account;
pub use errors::AccountError;
pub use subscription_status::{status_label, SubscriptionStatus};

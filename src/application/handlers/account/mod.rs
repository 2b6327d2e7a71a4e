//! Account operations: registration, login, subscription reconciliation,
//! and access checks.

#[cfg(test)]
pub(crate) mod testing;

mod check_agent_access;
mod check_subscription_access;
mod create_subscription;
mod get_current_account;
mod login;
mod register;

pub use check_agent_access::{CheckAgentAccessHandler, CheckAgentAccessQuery, CheckAgentAccessResult};
pub use check_subscription_access::{
    CheckSubscriptionAccessHandler, CheckSubscriptionAccessQuery, CheckSubscriptionAccessResult,
};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
    TRIAL_PERIOD_DAYS,
};
pub use get_current_account::{GetCurrentAccountHandler, GetCurrentAccountQuery};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use register::{RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult};

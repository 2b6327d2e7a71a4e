//! Request and response DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::account::{
    CheckAgentAccessResult, CheckSubscriptionAccessResult, CreateSubscriptionResult,
};
use crate::domain::account::{status_label, Account};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub price_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Account view returned by auth endpoints. The password hash never leaves
/// the domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub subscription_status: String,
    pub trial_ends_at: Option<String>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            username: account.username.clone(),
            subscription_status: status_label(account.subscription_status.as_ref()).to_string(),
            trial_ends_at: account.trial_ends_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for register and login: the session token plus the account view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub subscription_id: String,
    pub status: String,
}

impl From<CreateSubscriptionResult> for SubscriptionResponse {
    fn from(result: CreateSubscriptionResult) -> Self {
        Self {
            subscription_id: result.subscription_id,
            status: result.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAccessResponse {
    pub has_access: bool,
    pub subscription_status: String,
    pub trial_ends_at: Option<String>,
}

impl From<CheckSubscriptionAccessResult> for SubscriptionAccessResponse {
    fn from(result: CheckSubscriptionAccessResult) -> Self {
        Self {
            has_access: result.has_access,
            subscription_status: result.subscription_status,
            trial_ends_at: result.trial_ends_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAccessResponse {
    pub has_access: bool,
    pub agent_id: String,
}

impl From<CheckAgentAccessResult> for AgentAccessResponse {
    fn from(result: CheckAgentAccessResult) -> Self {
        Self {
            has_access: result.has_access,
            agent_id: result.agent_id,
        }
    }
}

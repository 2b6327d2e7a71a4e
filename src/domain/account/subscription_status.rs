//! Processor-reported subscription status and the access predicate.

use serde::{Deserialize, Serialize};

/// Subscription status as reported by the payment processor.
///
/// The processor is the source of truth; unrecognized values are preserved
/// verbatim in `Other` so the stored status always mirrors the processor's
/// last-known value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    IncompleteExpired,
    Unpaid,
    Paused,
    /// Status string we do not recognize, kept verbatim.
    Other(String),
}

impl SubscriptionStatus {
    /// Parse a processor status string.
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" => SubscriptionStatus::Canceled,
            "incomplete" => SubscriptionStatus::Incomplete,
            "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
            "unpaid" => SubscriptionStatus::Unpaid,
            "paused" => SubscriptionStatus::Paused,
            other => SubscriptionStatus::Other(other.to_string()),
        }
    }

    /// Processor wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Other(s) => s,
        }
    }

    /// Access evaluator: only `active` and `trialing` grant feature access.
    pub fn grants_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label for an optional status; absent status is reported as `"none"`.
pub fn status_label(status: Option<&SubscriptionStatus>) -> &str {
    status.map(SubscriptionStatus::as_str).unwrap_or("none")
}

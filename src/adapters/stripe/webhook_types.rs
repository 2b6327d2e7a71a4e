//! Stripe-specific types for webhook handling.
//!
//! These types mirror the Stripe API objects this backend consumes: the
//! webhook event envelope, customers, subscriptions, and payment intents.
//! They parse actual Stripe JSON and are mapped to port types before any
//! domain code sees them.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    MissingHeader,
    /// Missing timestamp component (t=...).
    MissingTimestamp,
    /// Missing v1 signature component.
    MissingV1Signature,
    /// Invalid timestamp format.
    InvalidTimestamp,
    /// Invalid signature format (not valid hex).
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "Missing Stripe-Signature header"),
            Self::MissingTimestamp => write!(f, "Missing timestamp (t=) in signature"),
            Self::MissingV1Signature => write!(f, "Missing v1 signature in header"),
            Self::InvalidTimestamp => write!(f, "Invalid timestamp format"),
            Self::InvalidSignatureFormat => write!(f, "Invalid signature format (not valid hex)"),
        }
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed Stripe-Signature header components.
///
/// The header format is `t=timestamp,v1=signature`, possibly followed by
/// legacy scheme entries which are ignored.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe generated the event.
    pub timestamp: i64,

    /// Primary v1 signature (HMAC-SHA256, hex-decoded).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(SignatureParseError::MissingTimestamp);
            };
            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    v1_signature = Some(
                        hex_decode(value.trim())
                            .ok_or(SignatureParseError::InvalidSignatureFormat)?,
                    );
                }
                // Unknown schemes (v0 etc.) are ignored for forward compatibility.
                _ => {}
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or(SignatureParseError::MissingTimestamp)?,
            v1_signature: v1_signature.ok_or(SignatureParseError::MissingV1Signature)?,
        })
    }
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Encode bytes to hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw Stripe webhook event as received from the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Customer email address.
    pub email: Option<String>,

    /// Customer name.
    pub name: Option<String>,

    /// Whether the customer has been deleted.
    #[serde(default)]
    pub deleted: bool,
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer ID owning this subscription.
    pub customer: String,

    /// Subscription status ("trialing", "active", ...).
    pub status: String,

    /// When the trial ends (Unix timestamp), if trialing.
    pub trial_end: Option<i64>,
}

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Unique payment intent identifier (pi_...).
    pub id: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Currency (lowercase, e.g., "usd").
    pub currency: String,

    /// Intent status ("requires_payment_method", "succeeded", ...).
    pub status: String,

    /// Client-side confirmation secret. Absent in webhook payloads for
    /// some API versions.
    pub client_secret: Option<String>,

    /// Custom metadata attached at creation.
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,
}

//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API.
//! Handles customers, subscriptions, payment intents, and webhook
//! verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::account::SubscriptionStatus;
use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Subscription, WebhookEvent,
    WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    hex_encode, SignatureHeader, StripeCustomer, StripePaymentIntent, StripeSubscription,
    StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// Uses constant-time comparison to prevent timing attacks and validates
    /// the timestamp to prevent replay attacks.
    fn verify_signature(&self, payload: &[u8], header: &SignatureHeader) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_signature(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_signature("Event timestamp in future"));
        }

        let signed_payload = format!(
            "{}.{}",
            header.timestamp,
            String::from_utf8_lossy(payload)
        );

        let mut mac = HmacSha256::new_from_slice(
            self.config.webhook_secret.expose_secret().as_bytes(),
        )
        .expect("HMAC can take key of any size");
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!(
                expected_signature = hex_encode(expected_bytes),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_signature("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event envelope and convert it to port types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_payload(format!("Invalid JSON: {}", e))
        })?;

        let event_type = match stripe_event.event_type.as_str() {
            "payment_intent.succeeded" => WebhookEventType::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentIntentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = match stripe_event.event_type.as_str() {
            s if s.starts_with("payment_intent.") => {
                let intent: StripePaymentIntent =
                    serde_json::from_value(stripe_event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_payload(format!("Invalid payment intent: {}", e))
                    })?;
                WebhookEventData::PaymentIntent {
                    intent_id: intent.id,
                    amount_minor: intent.amount,
                    currency: intent.currency,
                }
            }
            _ => WebhookEventData::Raw {
                json: serde_json::to_string(&stripe_event.data.object).unwrap_or_default(),
            },
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }

    /// POST a form-encoded request to the Stripe API and decode the response.
    async fn post_form<T, P>(&self, path: &str, params: &P) -> Result<T, PaymentError>
    where
        T: serde::de::DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(path, error = %error_text, "Stripe API call failed");
            return Err(PaymentError::new(
                PaymentErrorCode::ProviderError,
                stripe_error_message(&error_text),
            ));
        }

        response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }
}

/// Extract the human-readable message from a Stripe error body, falling back
/// to the raw body when it is not the documented error envelope.
fn stripe_error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorDetail,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!("Stripe API error: {}", body),
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let params = vec![
            ("email", request.email.clone()),
            ("name", request.name.clone()),
        ];

        let stripe_customer: StripeCustomer = self.post_form("/v1/customers", &params).await?;

        Ok(Customer {
            id: stripe_customer.id,
            email: stripe_customer.email.unwrap_or(request.email),
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        let mut params = vec![
            ("customer", request.customer_id.clone()),
            ("items[0][price]", request.price_id.clone()),
        ];

        if let Some(days) = request.trial_period_days {
            params.push(("trial_period_days", days.to_string()));
        }

        let stripe_sub: StripeSubscription = self.post_form("/v1/subscriptions", &params).await?;

        Ok(Subscription {
            id: stripe_sub.id,
            customer_id: stripe_sub.customer,
            status: SubscriptionStatus::parse(&stripe_sub.status),
            trial_end: stripe_sub.trial_end,
        })
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut params = vec![
            ("amount".to_string(), request.amount_minor.to_string()),
            ("currency".to_string(), request.currency.clone()),
            (
                "metadata[user_id]".to_string(),
                request.account_id.to_string(),
            ),
        ];

        // Stripe form encoding brackets each metadata key.
        for (key, value) in &request.metadata {
            if key != "user_id" {
                params.push((format!("metadata[{}]", key), value.clone()));
            }
        }

        let stripe_intent: StripePaymentIntent =
            self.post_form("/v1/payment_intents", &params).await?;

        let client_secret = stripe_intent.client_secret.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Stripe response missing client_secret",
            )
        })?;

        Ok(PaymentIntent {
            id: stripe_intent.id,
            client_secret,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_signature(e.to_string())
        })?;

        self.verify_signature(payload, &header)?;

        let event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            "Webhook signature verified"
        );

        Ok(event)
    }
}

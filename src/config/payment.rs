//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: SecretString,

    /// ISO currency code for payment intents
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Stripe API base URL override (tests and mock servers)
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        let webhook_secret = self.stripe_webhook_secret.expose_secret();
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE_WEBHOOK_SECRET",
            ));
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }

        Ok(())
    }
}

fn default_currency() -> String {
    "usd".to_string()
}

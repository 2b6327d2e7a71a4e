//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (JWT session tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        // Short secrets are tolerated in development only.
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    // 24 hours
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn validation_rejects_empty_secret() {
        assert!(config("").validate(&Environment::Development).is_err());
    }

    #[test]
    fn short_secret_is_rejected_in_production_only() {
        let config = config("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn validation_rejects_non_positive_ttl() {
        let mut config = config("0123456789abcdef0123456789abcdef");
        config.token_ttl_secs = 0;
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn debug_does_not_reveal_secret() {
        let config = config("super-secret-value");
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }
}

//! JWT session token adapter.
//!
//! Implements the `TokenService` port with HS256-signed JWTs. The subject
//! claim carries the account id; expiry is enforced on verification.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::ports::TokenService;

/// JWT claims for a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account id.
    sub: String,
    /// Expiry (Unix timestamp).
    exp: i64,
    /// Issued at (Unix timestamp).
    iat: i64,
}

/// HS256 JWT implementation of the TokenService port.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token lifetime in seconds.
    ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            ttl_secs,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account_id: &AccountId) -> Result<String, DomainError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            exp: now + self.ttl_secs,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to issue token: {}", e))
        })
    }

    fn verify(&self, token: &str) -> Result<AccountId, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| DomainError::new(ErrorCode::Unauthorized, "Invalid or expired token"))?;

        data.claims
            .sub
            .parse()
            .map_err(|_| DomainError::new(ErrorCode::Unauthorized, "Invalid token subject"))
    }
}

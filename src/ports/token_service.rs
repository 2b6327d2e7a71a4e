//! Session token port.
//!
//! The HTTP layer authenticates requests with bearer tokens; this port
//! isolates handlers from the token format (JWT in production).

use crate::domain::foundation::{AccountId, DomainError};

/// Port for issuing and verifying session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for an authenticated account.
    fn issue(&self, account_id: &AccountId) -> Result<String, DomainError>;

    /// Verify a token and return the account it was issued for.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for expired, tampered, or malformed tokens
    fn verify(&self, token: &str) -> Result<AccountId, DomainError>;
}

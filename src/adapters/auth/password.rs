//! Argon2id password hashing adapter.
//!
//! Implements the `PasswordHasher` port with Argon2id and PHC-formatted
//! hash strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Configuration for password hashing cost.
#[derive(Clone, Debug)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism.
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        // OWASP recommended minimum for Argon2id.
        Self {
            memory_cost: 19 * 1024,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Config {
    /// Faster settings for development/testing (NOT for production).
    #[cfg(any(test, debug_assertions))]
    pub fn fast() -> Self {
        Self {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// Argon2id implementation of the PasswordHasher port.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    config: Argon2Config,
}

impl Argon2PasswordHasher {
    pub fn new(config: Argon2Config) -> Self {
        Self { config }
    }

    fn build_argon2(&self) -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            None,
        )
        .map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Invalid Argon2 params: {}", e))
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self.build_argon2()?;

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Password hashing failed: {}", e),
                )
            })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Invalid password hash format: {}", e),
            )
        })?;

        // Argon2 verify is already constant-time.
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

//! Password hashing port.

use crate::domain::foundation::DomainError;

/// Port for password hashing and verification.
///
/// Hashing is CPU-bound, not I/O-bound, so this port is synchronous; callers
/// on the async path should treat a production-strength hash as blocking
/// work.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a storable hash string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// hashes or hasher failures.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hasher_is_object_safe() {
        fn _accepts_dyn(_hasher: &dyn PasswordHasher) {}
    }
}

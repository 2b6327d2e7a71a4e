//! Authentication adapters - password hashing and session tokens.

mod password;
mod tokens;

pub use password::{Argon2Config, Argon2PasswordHasher};
pub use tokens::JwtTokenService;

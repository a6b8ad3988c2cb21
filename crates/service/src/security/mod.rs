//! Credential hashing and bearer token issuing/validation.

pub mod password;
pub mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{decode_token, issue_token, Claims, TokenConfig};

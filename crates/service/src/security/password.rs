use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// One-way password hashing. Only `hash` and `verify` are ever needed.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, ServiceError>;
    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    fn verify(&self, stored: &str, plain: &str) -> Result<bool, ServiceError>;
}

/// Salted Argon2id hasher producing PHC strings.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self { Self::default() }

    /// Custom cost parameters (memory KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, ServiceError> {
        let params = Params::new(m_cost, t_cost, p_cost, None).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| ServiceError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, stored: &str, plain: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(stored).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(self.argon.verify_password(plain.as_bytes(), &parsed).is_ok())
    }
}

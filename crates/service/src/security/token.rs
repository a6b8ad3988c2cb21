use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, Role};
use crate::errors::ServiceError;

/// Signing parameters for bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expire_minutes: i64,
}

impl From<&configs::JwtConfig> for TokenConfig {
    fn from(cfg: &configs::JwtConfig) -> Self {
        Self {
            secret: cfg.key.clone(),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            expire_minutes: cfg.expire_minutes,
        }
    }
}

/// Claims carried by every issued token. `role` holds the numeric role as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid, ServiceError> {
        Uuid::parse_str(&self.sub).map_err(|_| ServiceError::Token("subject is not an account id".into()))
    }

    /// `None` if the role claim is not one of the known roles.
    pub fn role(&self) -> Option<Role> {
        self.role.parse::<i32>().ok().and_then(|r| Role::try_from(r).ok())
    }
}

/// Issue an HS256 token for `account`, valid for `cfg.expire_minutes`.
pub fn issue_token(cfg: &TokenConfig, account: &Account) -> Result<String, ServiceError> {
    let now = Utc::now();
    let claims = Claims {
        sub: account.id.to_string(),
        email: account.email.clone(),
        role: account.role.as_i32().to_string(),
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(cfg.expire_minutes)).timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(cfg.secret.as_bytes()))
        .map_err(|e| ServiceError::Token(e.to_string()))
}

/// Validate signature, issuer, audience and expiry, returning the claims.
pub fn decode_token(cfg: &TokenConfig, token: &str) -> Result<Claims, ServiceError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(cfg.secret.as_bytes()), &validation)
        .map_err(|e| ServiceError::Token(e.to_string()))?;
    Ok(data.claims)
}

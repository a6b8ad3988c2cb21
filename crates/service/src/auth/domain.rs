use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Role;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub account_name: String,
    pub account_email: String,
    pub account_password: String,
    pub account_role: Role,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued token plus the account it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub account_id: Uuid,
    pub account_name: String,
    pub account_email: String,
    pub account_role: Role,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub account_name: String,
    pub account_email: String,
    pub account_password: String,
    pub account_role: Role,
}

/// Full replacement of an account. A missing or empty password keeps the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub account_id: Uuid,
    pub account_name: String,
    pub account_email: String,
    #[serde(default)]
    pub account_password: Option<String>,
    pub account_role: Role,
}

/// Account as returned to callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account_id: Uuid,
    pub account_name: String,
    pub account_email: String,
    pub account_role: Role,
    pub role_name: String,
    pub created_news_articles_count: usize,
    pub updated_news_articles_count: usize,
    pub can_delete: bool,
}

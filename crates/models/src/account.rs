use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_len("account name", name, MAX_NAME_LEN)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    errors::require_len("email", email, MAX_EMAIL_LEN)?;
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ModelError::Validation("invalid email".into()));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(ModelError::Validation(format!(
            "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_role(role: i32) -> Result<(), ModelError> {
    if !(1..=3).contains(&role) {
        return Err(ModelError::Validation("role must be 1 (Staff), 2 (Lecturer), or 3 (Admin)".into()));
    }
    Ok(())
}

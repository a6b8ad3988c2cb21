use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_NOTE_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub note: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_len("tag name", name, MAX_NAME_LEN)
}

pub fn validate_note(note: &str) -> Result<(), ModelError> {
    errors::check_max_len("note", note, MAX_NOTE_LEN)
}

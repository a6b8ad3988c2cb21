use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Parent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Parent => Entity::belongs_to(Entity).from(Column::ParentId).to(Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    errors::require_len("category name", name, MAX_NAME_LEN)
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    errors::check_max_len("description", description, MAX_DESCRIPTION_LEN)
}

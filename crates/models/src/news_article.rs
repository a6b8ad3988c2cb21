use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::{account, category};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_HEADLINE_LEN: usize = 500;
pub const MAX_SOURCE_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_article")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub headline: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub source: String,
    pub status: bool,
    pub category_id: Uuid,
    pub created_by_id: Uuid,
    pub updated_by_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Creator,
    Updater,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::Creator => Entity::belongs_to(account::Entity).from(Column::CreatedById).to(account::Column::Id).into(),
            Relation::Updater => Entity::belongs_to(account::Entity).from(Column::UpdatedById).to(account::Column::Id).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    errors::require_len("news title", title, MAX_TITLE_LEN)
}

pub fn validate_headline(headline: &str) -> Result<(), ModelError> {
    errors::require_len("headline", headline, MAX_HEADLINE_LEN)
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.trim().is_empty() {
        return Err(ModelError::Validation("news content is required".into()));
    }
    Ok(())
}

pub fn validate_source(source: &str) -> Result<(), ModelError> {
    errors::check_max_len("news source", source, MAX_SOURCE_LEN)
}

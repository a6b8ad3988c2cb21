//! Join rows for the article <-> tag many-to-many association.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{news_article, tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub news_article_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    NewsArticle,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::NewsArticle => Entity::belongs_to(news_article::Entity)
                .from(Column::NewsArticleId)
                .to(news_article::Column::Id)
                .into(),
            Relation::Tag => Entity::belongs_to(tag::Entity)
                .from(Column::TagId)
                .to(tag::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

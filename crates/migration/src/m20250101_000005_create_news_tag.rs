//! Create `news_tag` join table. Rows vanish with either side.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsTag::Table)
                    .if_not_exists()
                    .col(uuid(NewsTag::NewsArticleId).not_null())
                    .col(uuid(NewsTag::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_news_tag")
                            .col(NewsTag::NewsArticleId)
                            .col(NewsTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_tag_article")
                            .from(NewsTag::Table, NewsTag::NewsArticleId)
                            .to(NewsArticle::Table, NewsArticle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_tag_tag")
                            .from(NewsTag::Table, NewsTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(NewsTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum NewsTag { Table, NewsArticleId, TagId }

#[derive(DeriveIden)]
enum NewsArticle { Table, Id }

#[derive(DeriveIden)]
enum Tag { Table, Id }

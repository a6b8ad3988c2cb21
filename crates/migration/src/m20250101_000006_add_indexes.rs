use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Category: children lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_category_parent")
                    .table(Category::Table)
                    .col(Category::ParentId)
                    .to_owned(),
            )
            .await?;

        // NewsArticle: guards on category / creator / updater
        manager
            .create_index(
                Index::create()
                    .name("idx_news_article_category")
                    .table(NewsArticle::Table)
                    .col(NewsArticle::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_news_article_creator")
                    .table(NewsArticle::Table)
                    .col(NewsArticle::CreatedById)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_news_article_updater")
                    .table(NewsArticle::Table)
                    .col(NewsArticle::UpdatedById)
                    .to_owned(),
            )
            .await?;

        // NewsTag: reverse lookup by tag
        manager
            .create_index(
                Index::create()
                    .name("idx_news_tag_tag")
                    .table(NewsTag::Table)
                    .col(NewsTag::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_category_parent").table(Category::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_news_article_category").table(NewsArticle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_news_article_creator").table(NewsArticle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_news_article_updater").table(NewsArticle::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_news_tag_tag").table(NewsTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Category { Table, ParentId }

#[derive(DeriveIden)]
enum NewsArticle { Table, CategoryId, CreatedById, UpdatedById }

#[derive(DeriveIden)]
enum NewsTag { Table, TagId }

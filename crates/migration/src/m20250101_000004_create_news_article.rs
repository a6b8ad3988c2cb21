//! Create `news_article` table.
//!
//! Category and creator are required and block deletion of their targets;
//! the updater is optional.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsArticle::Table)
                    .if_not_exists()
                    .col(uuid(NewsArticle::Id).primary_key())
                    .col(string_len(NewsArticle::Title, 200).not_null())
                    .col(string_len(NewsArticle::Headline, 500).not_null())
                    .col(text(NewsArticle::Content).not_null())
                    .col(string_len(NewsArticle::Source, 200).not_null())
                    .col(boolean(NewsArticle::Status).not_null())
                    .col(uuid(NewsArticle::CategoryId).not_null())
                    .col(uuid(NewsArticle::CreatedById).not_null())
                    .col(ColumnDef::new(NewsArticle::UpdatedById).uuid().null())
                    .col(timestamp_with_time_zone(NewsArticle::CreatedAt).not_null())
                    .col(
                        ColumnDef::new(NewsArticle::ModifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_article_category")
                            .from(NewsArticle::Table, NewsArticle::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_article_creator")
                            .from(NewsArticle::Table, NewsArticle::CreatedById)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_article_updater")
                            .from(NewsArticle::Table, NewsArticle::UpdatedById)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(NewsArticle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum NewsArticle {
    Table,
    Id,
    Title,
    Headline,
    Content,
    Source,
    Status,
    CategoryId,
    CreatedById,
    UpdatedById,
    CreatedAt,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum Account { Table, Id }

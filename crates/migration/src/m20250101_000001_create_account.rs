//! Create `account` table.
//!
//! Email is unique; the password column only ever holds an argon2 PHC string.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Name, 100).not_null())
                    .col(string_len(Account::Email, 100).unique_key().not_null())
                    .col(string_len(Account::PasswordHash, 255).not_null())
                    .col(integer(Account::Role).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Id, Name, Email, PasswordHash, Role }

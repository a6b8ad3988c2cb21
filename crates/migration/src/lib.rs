//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_account;
mod m20250101_000002_create_category;
mod m20250101_000003_create_tag;
mod m20250101_000004_create_news_article;
mod m20250101_000005_create_news_tag;
mod m20250101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_account::Migration),
            Box::new(m20250101_000002_create_category::Migration),
            Box::new(m20250101_000003_create_tag::Migration),
            Box::new(m20250101_000004_create_news_article::Migration),
            Box::new(m20250101_000005_create_news_tag::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000006_add_indexes::Migration),
        ]
    }
}

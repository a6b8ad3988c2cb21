#![cfg(test)]
use std::sync::Arc;

use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use models::db::connect_with_config;

use crate::domain::{Account, Category, NewsArticle, Role, Tag};
use crate::security::{Argon2Hasher, PasswordHasher, TokenConfig};
use crate::uow::{memory::MemoryStore, Change, Entity, Store, UnitOfWork};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = cfg.min_connections.clamp(1, cfg.max_connections);
    cfg.connect_timeout_secs = cfg.connect_timeout_secs.max(5);
    cfg.acquire_timeout_secs = cfg.acquire_timeout_secs.max(10);
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&db_config()).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    connect_with_config(&db_config()).await
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn uow(store: &Arc<MemoryStore>) -> UnitOfWork {
    UnitOfWork::new(store.clone())
}

/// Cheap Argon2 parameters so tests do not spend seconds hashing.
pub fn fast_hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(Argon2Hasher::with_params(8, 1, 1).expect("argon2 params"))
}

pub fn token_config() -> TokenConfig {
    TokenConfig {
        secret: "test-secret-key-0123456789".into(),
        issuer: "news-test".into(),
        audience: "news-test-clients".into(),
        expire_minutes: 60,
    }
}

async fn insert<T: Entity>(store: &Arc<MemoryStore>, entity: T) -> T {
    store.commit(vec![Change::Insert(entity.clone().into_record())]).await.expect("seed insert");
    entity
}

pub async fn seed_account(store: &Arc<MemoryStore>, name: &str, email: &str, password: &str, role: Role) -> Account {
    let password_hash = fast_hasher().hash(password).expect("hash");
    insert(store, Account { id: Uuid::new_v4(), name: name.into(), email: email.into(), password_hash, role }).await
}

pub async fn seed_category(store: &Arc<MemoryStore>, name: &str, parent_id: Option<Uuid>, is_active: bool) -> Category {
    insert(
        store,
        Category { id: Uuid::new_v4(), name: name.into(), description: format!("{name} news"), parent_id, is_active },
    )
    .await
}

pub async fn seed_tag(store: &Arc<MemoryStore>, name: &str) -> Tag {
    insert(store, Tag { id: Uuid::new_v4(), name: name.into(), note: String::new() }).await
}

pub async fn seed_article(
    store: &Arc<MemoryStore>,
    title: &str,
    category_id: Uuid,
    created_by_id: Uuid,
    tag_ids: Vec<Uuid>,
    status: bool,
) -> NewsArticle {
    insert(
        store,
        NewsArticle {
            id: Uuid::new_v4(),
            title: title.into(),
            headline: format!("{title} headline"),
            content: format!("{title} body"),
            source: "wire".into(),
            status,
            category_id,
            created_by_id,
            updated_by_id: None,
            created_at: Utc::now(),
            modified_at: None,
            tag_ids,
        },
    )
    .await
}

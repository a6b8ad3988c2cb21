//! Unit of work: one repository per entity type sharing a single session of
//! staged changes, committed atomically by [`UnitOfWork::save_changes`].
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use service::domain::Tag;
//! use service::uow::{memory::MemoryStore, GenericRepository, UnitOfWork};
//!
//! let store = Arc::new(MemoryStore::new());
//! let uow = UnitOfWork::new(store.clone());
//! let tags = uow.repository::<Tag>();
//! let tag = Tag { id: uuid::Uuid::new_v4(), name: "rust".into(), note: String::new() };
//! tokio_test::block_on(tags.add(tag.clone()));
//! // staged rows are visible inside the unit of work
//! assert!(tokio_test::block_on(tags.get_by_id(tag.id)).unwrap().is_some());
//! assert_eq!(tokio_test::block_on(uow.save_changes()).unwrap(), 1);
//!
//! let fresh = UnitOfWork::new(store);
//! assert_eq!(tokio_test::block_on(fresh.repository::<Tag>().get_all()).unwrap().len(), 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::errors::ServiceError;

pub mod memory;
pub mod record;
pub mod repository;
pub mod seaorm;
pub mod store;

pub use record::{Change, Entity, EntityKind, Record};
pub use repository::{GenericRepository, Predicate, Repository};
pub use store::Store;

/// State shared by every repository handed out by one unit of work.
pub(crate) struct Session {
    store: Arc<dyn Store>,
    pending: AsyncMutex<Vec<Change>>,
}

pub struct UnitOfWork {
    session: Arc<Session>,
    repositories: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl UnitOfWork {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            session: Arc::new(Session { store, pending: AsyncMutex::new(Vec::new()) }),
            repositories: Mutex::new(HashMap::new()),
        }
    }

    /// Repository for `T`. Repeated calls return the same instance.
    pub fn repository<T: Entity>(&self) -> Arc<dyn GenericRepository<T>> {
        let mut repos = self.repositories.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = repos
            .get(&TypeId::of::<T>())
            .and_then(|r| r.downcast_ref::<Arc<dyn GenericRepository<T>>>())
        {
            return Arc::clone(existing);
        }
        let repo: Arc<dyn GenericRepository<T>> = Arc::new(Repository::<T>::new(Arc::clone(&self.session)));
        repos.insert(TypeId::of::<T>(), Box::new(Arc::clone(&repo)));
        repo
    }

    /// Persist every staged change in one atomic commit and return the number
    /// of rows affected. On failure nothing is persisted and the staged
    /// changes are dropped.
    pub async fn save_changes(&self) -> Result<u64, ServiceError> {
        let changes = std::mem::take(&mut *self.session.pending.lock().await);
        if changes.is_empty() {
            return Ok(0);
        }
        let staged = changes.len();
        let affected = self.session.store.commit(changes).await?;
        debug!(staged, affected, "unit of work saved");
        Ok(affected)
    }

    /// Whether anything is staged and not yet saved.
    pub async fn has_changes(&self) -> bool {
        !self.session.pending.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::domain::{Category, Tag};
    use uuid::Uuid;

    fn tag(name: &str) -> Tag {
        Tag { id: Uuid::new_v4(), name: name.into(), note: String::new() }
    }

    #[tokio::test]
    async fn repository_is_memoized_per_type() {
        let uow = UnitOfWork::new(Arc::new(MemoryStore::new()));
        let a = uow.repository::<Tag>();
        let b = uow.repository::<Tag>();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn staged_changes_are_visible_but_not_persisted() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryStore::new());
        let uow = UnitOfWork::new(store.clone());
        let tags = uow.repository::<Tag>();
        let t = tag("news");
        tags.add(t.clone()).await;
        assert!(tags.exists(&|x: &Tag| x.name == "news").await?);
        assert!(uow.has_changes().await);

        let other = UnitOfWork::new(store.clone());
        assert!(other.repository::<Tag>().get_all().await?.is_empty());

        // dropping the unit of work discards the staged insert
        drop(uow);
        let again = UnitOfWork::new(store);
        assert!(again.repository::<Tag>().get_by_id(t.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn overlay_applies_update_and_delete() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryStore::new());
        let seed = UnitOfWork::new(store.clone());
        let keep = tag("keep");
        let gone = tag("gone");
        seed.repository::<Tag>().add(keep.clone()).await;
        seed.repository::<Tag>().add(gone.clone()).await;
        assert_eq!(seed.save_changes().await?, 2);

        let uow = UnitOfWork::new(store);
        let tags = uow.repository::<Tag>();
        tags.update(Tag { name: "kept".into(), ..keep.clone() }).await;
        tags.delete(&gone).await;
        let all = tags.get_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "kept");
        assert!(tags.get_by_id(gone.id).await?.is_none());
        assert_eq!(uow.save_changes().await?, 2);
        assert_eq!(uow.save_changes().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn one_commit_spans_repositories() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryStore::new());
        let uow = UnitOfWork::new(store.clone());
        uow.repository::<Tag>().add(tag("a")).await;
        uow.repository::<Category>()
            .add(Category {
                id: Uuid::new_v4(),
                name: "c".into(),
                description: String::new(),
                parent_id: Some(Uuid::new_v4()),
                is_active: true,
            })
            .await;
        // dangling parent fails the whole commit, so the tag is not saved either
        assert!(uow.save_changes().await.is_err());
        let fresh = UnitOfWork::new(store);
        assert!(fresh.repository::<Tag>().get_all().await?.is_empty());
        Ok(())
    }
}

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::record::{Change, Entity};
use super::Session;
use crate::errors::ServiceError;

/// Predicate used by [`GenericRepository::find`] and [`GenericRepository::exists`].
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Uniform data access for one entity type.
///
/// Reads see committed rows plus whatever this unit of work has staged.
/// Mutations only stage; nothing is persisted until
/// [`UnitOfWork::save_changes`](super::UnitOfWork::save_changes).
#[async_trait]
pub trait GenericRepository<T: Entity>: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, ServiceError>;
    async fn get_all(&self) -> Result<Vec<T>, ServiceError>;
    async fn find(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, ServiceError>;
    async fn exists(&self, predicate: Predicate<'_, T>) -> Result<bool, ServiceError>;
    async fn add(&self, entity: T);
    async fn update(&self, entity: T);
    async fn delete(&self, entity: &T);
}

/// Repository bound to a unit of work's session.
pub struct Repository<T> {
    session: Arc<Session>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Repository<T> {
    pub(super) fn new(session: Arc<Session>) -> Self {
        Self { session, _entity: PhantomData }
    }

    async fn stage(&self, change: Change) {
        self.session.pending.lock().await.push(change);
    }
}

#[async_trait]
impl<T: Entity> GenericRepository<T> for Repository<T> {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, ServiceError> {
        {
            let pending = self.session.pending.lock().await;
            // the latest staged change for this row wins
            if let Some(change) = pending.iter().rev().find(|c| c.kind() == T::KIND && c.id() == id) {
                return Ok(match change {
                    Change::Insert(r) | Change::Update(r) => T::from_record(r.clone()),
                    Change::Delete { .. } => None,
                });
            }
        }
        let found = self.session.store.load_one(T::KIND, id).await?;
        Ok(found.and_then(T::from_record))
    }

    async fn get_all(&self) -> Result<Vec<T>, ServiceError> {
        let stored = self.session.store.load(T::KIND).await?;
        let mut rows: Vec<T> = stored.into_iter().filter_map(T::from_record).collect();
        let pending = self.session.pending.lock().await;
        for change in pending.iter().filter(|c| c.kind() == T::KIND) {
            match change {
                Change::Insert(r) => rows.extend(T::from_record(r.clone())),
                Change::Update(r) => {
                    if let Some(entity) = T::from_record(r.clone()) {
                        if let Some(slot) = rows.iter_mut().find(|row| row.id() == entity.id()) {
                            *slot = entity;
                        }
                    }
                }
                Change::Delete { id, .. } => rows.retain(|row| row.id() != *id),
            }
        }
        Ok(rows)
    }

    async fn find(&self, predicate: Predicate<'_, T>) -> Result<Vec<T>, ServiceError> {
        let rows = self.get_all().await?;
        Ok(rows.into_iter().filter(|row| predicate(row)).collect())
    }

    async fn exists(&self, predicate: Predicate<'_, T>) -> Result<bool, ServiceError> {
        let rows = self.get_all().await?;
        Ok(rows.iter().any(|row| predicate(row)))
    }

    async fn add(&self, entity: T) {
        self.stage(Change::Insert(entity.into_record())).await;
    }

    async fn update(&self, entity: T) {
        self.stage(Change::Update(entity.into_record())).await;
    }

    async fn delete(&self, entity: &T) {
        self.stage(Change::Delete { kind: T::KIND, id: entity.id() }).await;
    }
}

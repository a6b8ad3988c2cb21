use async_trait::async_trait;
use uuid::Uuid;

use super::record::{Change, EntityKind, Record};
use crate::errors::ServiceError;

/// Durable storage behind a unit of work.
///
/// Reads return committed rows in the store's natural order. `commit` is
/// all-or-nothing: either every change lands or none does.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, ServiceError>;
    async fn load_one(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>, ServiceError>;
    /// Apply the changes in order and return the number of rows affected,
    /// counting article/tag association rows written explicitly.
    async fn commit(&self, changes: Vec<Change>) -> Result<u64, ServiceError>;
}

//! In-process store used by tests, doc examples and `store = "memory"`.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::record::{Change, Entity, EntityKind, Record};
use super::store::Store;
use crate::domain::{Account, Category, NewsArticle, Tag};
use crate::errors::ServiceError;

#[derive(Debug, Default, Clone)]
struct Tables {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    articles: Vec<NewsArticle>,
}

/// Keeps rows in insertion order and enforces the same keys the relational
/// schema does: unique ids, unique account email and foreign keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.records(kind))
    }

    async fn load_one(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables.records(kind).into_iter().find(|r| r.id() == id))
    }

    async fn commit(&self, changes: Vec<Change>) -> Result<u64, ServiceError> {
        let mut tables = self.tables.write().await;
        // apply against a copy so a failing change leaves nothing behind
        let mut working = tables.clone();
        let mut affected = 0;
        for change in changes {
            affected += working.apply(change)?;
        }
        working.check_references()?;
        *tables = working;
        debug!(affected, "memory store commit");
        Ok(affected)
    }
}

impl Tables {
    fn records(&self, kind: EntityKind) -> Vec<Record> {
        match kind {
            EntityKind::Account => to_records(&self.accounts),
            EntityKind::Category => to_records(&self.categories),
            EntityKind::Tag => to_records(&self.tags),
            EntityKind::NewsArticle => to_records(&self.articles),
        }
    }

    fn apply(&mut self, change: Change) -> Result<u64, ServiceError> {
        match change {
            Change::Insert(record) => self.insert(record),
            Change::Update(record) => self.update(record),
            Change::Delete { kind, id } => self.delete(kind, id),
        }
    }

    fn insert(&mut self, record: Record) -> Result<u64, ServiceError> {
        match record {
            Record::Account(a) => {
                self.ensure_unique_email(&a)?;
                insert_row(&mut self.accounts, a)
            }
            Record::Category(c) => insert_row(&mut self.categories, c),
            Record::Tag(t) => insert_row(&mut self.tags, t),
            Record::NewsArticle(n) => {
                let links = n.tag_ids.len() as u64;
                Ok(insert_row(&mut self.articles, n)? + links)
            }
        }
    }

    fn update(&mut self, record: Record) -> Result<u64, ServiceError> {
        match record {
            Record::Account(a) => {
                self.ensure_unique_email(&a)?;
                update_row(&mut self.accounts, a).map(|_| 1)
            }
            Record::Category(c) => update_row(&mut self.categories, c).map(|_| 1),
            Record::Tag(t) => update_row(&mut self.tags, t).map(|_| 1),
            Record::NewsArticle(n) => {
                let new_tags = n.tag_ids.clone();
                let old = update_row(&mut self.articles, n)?;
                let removed = old.tag_ids.iter().filter(|t| !new_tags.contains(t)).count();
                let added = new_tags.iter().filter(|t| !old.tag_ids.contains(t)).count();
                Ok(1 + (removed + added) as u64)
            }
        }
    }

    fn delete(&mut self, kind: EntityKind, id: Uuid) -> Result<u64, ServiceError> {
        match kind {
            EntityKind::Account => delete_row(&mut self.accounts, id).map(|_| 1),
            EntityKind::Category => delete_row(&mut self.categories, id).map(|_| 1),
            EntityKind::NewsArticle => delete_row(&mut self.articles, id).map(|_| 1),
            EntityKind::Tag => {
                delete_row(&mut self.tags, id)?;
                // association rows go with the tag
                for article in self.articles.iter_mut() {
                    article.tag_ids.retain(|t| *t != id);
                }
                Ok(1)
            }
        }
    }

    fn ensure_unique_email(&self, account: &Account) -> Result<(), ServiceError> {
        if self.accounts.iter().any(|a| a.id != account.id && a.email == account.email) {
            return Err(ServiceError::Db(format!("duplicate key: account email {}", account.email)));
        }
        Ok(())
    }

    fn check_references(&self) -> Result<(), ServiceError> {
        let has_category = |id: &Uuid| self.categories.iter().any(|c| c.id == *id);
        let has_account = |id: &Uuid| self.accounts.iter().any(|a| a.id == *id);
        let has_tag = |id: &Uuid| self.tags.iter().any(|t| t.id == *id);

        for c in &self.categories {
            if let Some(parent) = &c.parent_id {
                if !has_category(parent) {
                    return Err(fk_violation("category", c.id, "parent category"));
                }
            }
        }
        for n in &self.articles {
            if !has_category(&n.category_id) {
                return Err(fk_violation("news article", n.id, "category"));
            }
            if !has_account(&n.created_by_id) {
                return Err(fk_violation("news article", n.id, "creator"));
            }
            if let Some(updater) = &n.updated_by_id {
                if !has_account(updater) {
                    return Err(fk_violation("news article", n.id, "updater"));
                }
            }
            if !n.tag_ids.iter().all(has_tag) {
                return Err(fk_violation("news article", n.id, "tag"));
            }
        }
        Ok(())
    }
}

fn to_records<T: Entity>(rows: &[T]) -> Vec<Record> {
    rows.iter().cloned().map(Entity::into_record).collect()
}

fn insert_row<T: Entity>(rows: &mut Vec<T>, row: T) -> Result<u64, ServiceError> {
    if rows.iter().any(|r| r.id() == row.id()) {
        return Err(ServiceError::Db(format!("duplicate key: {} {}", T::KIND.name(), row.id())));
    }
    rows.push(row);
    Ok(1)
}

fn update_row<T: Entity>(rows: &mut [T], row: T) -> Result<T, ServiceError> {
    let slot = rows
        .iter_mut()
        .find(|r| r.id() == row.id())
        .ok_or_else(|| missing_row(T::KIND, row.id()))?;
    Ok(std::mem::replace(slot, row))
}

fn delete_row<T: Entity>(rows: &mut Vec<T>, id: Uuid) -> Result<T, ServiceError> {
    let pos = rows
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| missing_row(T::KIND, id))?;
    Ok(rows.remove(pos))
}

fn missing_row(kind: EntityKind, id: Uuid) -> ServiceError {
    ServiceError::Db(format!("{} {} does not exist", kind.name(), id))
}

fn fk_violation(table: &str, id: Uuid, target: &str) -> ServiceError {
    ServiceError::Db(format!("foreign key violation: {table} {id} references a missing {target}"))
}

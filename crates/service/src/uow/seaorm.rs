use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use models::{account, category, news_article, news_tag, tag};

use super::record::{Change, EntityKind, Record};
use super::store::Store;
use crate::domain::{Account, Category, NewsArticle, Role, Tag};
use crate::errors::ServiceError;

/// PostgreSQL-backed store. Every commit runs in one database transaction.
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, ServiceError> {
        let records = match kind {
            EntityKind::Account => account::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| account_from_model(m).map(Record::Account))
                .collect::<Result<Vec<_>, _>>()?,
            EntityKind::Category => category::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| Record::Category(category_from_model(m)))
                .collect(),
            EntityKind::Tag => tag::Entity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| Record::Tag(tag_from_model(m)))
                .collect(),
            EntityKind::NewsArticle => {
                let articles = news_article::Entity::find().all(&self.db).await?;
                let mut links: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
                for link in news_tag::Entity::find().all(&self.db).await? {
                    links.entry(link.news_article_id).or_default().push(link.tag_id);
                }
                articles
                    .into_iter()
                    .map(|m| {
                        let tag_ids = links.remove(&m.id).unwrap_or_default();
                        Record::NewsArticle(article_from_model(m, tag_ids))
                    })
                    .collect()
            }
        };
        Ok(records)
    }

    async fn load_one(&self, kind: EntityKind, id: Uuid) -> Result<Option<Record>, ServiceError> {
        let record = match kind {
            EntityKind::Account => match account::Entity::find_by_id(id).one(&self.db).await? {
                Some(m) => Some(Record::Account(account_from_model(m)?)),
                None => None,
            },
            EntityKind::Category => category::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| Record::Category(category_from_model(m))),
            EntityKind::Tag => tag::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| Record::Tag(tag_from_model(m))),
            EntityKind::NewsArticle => match news_article::Entity::find_by_id(id).one(&self.db).await? {
                Some(m) => {
                    let tag_ids = linked_tags(&self.db, m.id).await?;
                    Some(Record::NewsArticle(article_from_model(m, tag_ids)))
                }
                None => None,
            },
        };
        Ok(record)
    }

    async fn commit(&self, changes: Vec<Change>) -> Result<u64, ServiceError> {
        let txn = self.db.begin().await?;
        let mut affected = 0;
        for change in changes {
            // an early return drops `txn`, which rolls it back
            affected += apply(&txn, change).await?;
        }
        txn.commit().await?;
        debug!(affected, "database commit");
        Ok(affected)
    }
}

async fn apply<C: ConnectionTrait>(conn: &C, change: Change) -> Result<u64, ServiceError> {
    match change {
        Change::Insert(Record::Account(a)) => {
            account_active(a).insert(conn).await?;
            Ok(1)
        }
        Change::Insert(Record::Category(c)) => {
            category_active(c).insert(conn).await?;
            Ok(1)
        }
        Change::Insert(Record::Tag(t)) => {
            tag_active(t).insert(conn).await?;
            Ok(1)
        }
        Change::Insert(Record::NewsArticle(n)) => {
            let id = n.id;
            let tag_ids = n.tag_ids.clone();
            article_active(n).insert(conn).await?;
            Ok(1 + link_tags(conn, id, &tag_ids).await?)
        }
        Change::Update(Record::Account(a)) => {
            account_active(a).update(conn).await?;
            Ok(1)
        }
        Change::Update(Record::Category(c)) => {
            category_active(c).update(conn).await?;
            Ok(1)
        }
        Change::Update(Record::Tag(t)) => {
            tag_active(t).update(conn).await?;
            Ok(1)
        }
        Change::Update(Record::NewsArticle(n)) => {
            let id = n.id;
            let wanted = n.tag_ids.clone();
            article_active(n).update(conn).await?;
            let current = linked_tags(conn, id).await?;
            let removed: Vec<Uuid> = current.iter().filter(|t| !wanted.contains(t)).copied().collect();
            let added: Vec<Uuid> = wanted.iter().filter(|t| !current.contains(t)).copied().collect();
            let mut affected = 1;
            if !removed.is_empty() {
                affected += news_tag::Entity::delete_many()
                    .filter(news_tag::Column::NewsArticleId.eq(id))
                    .filter(news_tag::Column::TagId.is_in(removed))
                    .exec(conn)
                    .await?
                    .rows_affected;
            }
            affected += link_tags(conn, id, &added).await?;
            Ok(affected)
        }
        Change::Delete { kind, id } => {
            // news_tag rows cascade at the database level
            let res = match kind {
                EntityKind::Account => account::Entity::delete_by_id(id).exec(conn).await?,
                EntityKind::Category => category::Entity::delete_by_id(id).exec(conn).await?,
                EntityKind::Tag => tag::Entity::delete_by_id(id).exec(conn).await?,
                EntityKind::NewsArticle => news_article::Entity::delete_by_id(id).exec(conn).await?,
            };
            if res.rows_affected == 0 {
                return Err(ServiceError::Db(format!("{} {} does not exist", kind.name(), id)));
            }
            Ok(res.rows_affected)
        }
    }
}

async fn linked_tags<C: ConnectionTrait>(conn: &C, article_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
    let rows = news_tag::Entity::find()
        .filter(news_tag::Column::NewsArticleId.eq(article_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|r| r.tag_id).collect())
}

async fn link_tags<C: ConnectionTrait>(conn: &C, article_id: Uuid, tag_ids: &[Uuid]) -> Result<u64, ServiceError> {
    if tag_ids.is_empty() {
        return Ok(0);
    }
    let rows = tag_ids.iter().map(|tag_id| news_tag::ActiveModel {
        news_article_id: Set(article_id),
        tag_id: Set(*tag_id),
    });
    let inserted = news_tag::Entity::insert_many(rows).exec_without_returning(conn).await?;
    Ok(inserted)
}

fn account_from_model(m: account::Model) -> Result<Account, ServiceError> {
    let role = Role::try_from(m.role).map_err(|_| ServiceError::Db(format!("account {} has unknown role {}", m.id, m.role)))?;
    Ok(Account { id: m.id, name: m.name, email: m.email, password_hash: m.password_hash, role })
}

fn category_from_model(m: category::Model) -> Category {
    Category { id: m.id, name: m.name, description: m.description, parent_id: m.parent_id, is_active: m.is_active }
}

fn tag_from_model(m: tag::Model) -> Tag {
    Tag { id: m.id, name: m.name, note: m.note }
}

fn article_from_model(m: news_article::Model, tag_ids: Vec<Uuid>) -> NewsArticle {
    NewsArticle {
        id: m.id,
        title: m.title,
        headline: m.headline,
        content: m.content,
        source: m.source,
        status: m.status,
        category_id: m.category_id,
        created_by_id: m.created_by_id,
        updated_by_id: m.updated_by_id,
        created_at: m.created_at.with_timezone(&Utc),
        modified_at: m.modified_at.map(|t| t.with_timezone(&Utc)),
        tag_ids,
    }
}

fn account_active(a: Account) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(a.id),
        name: Set(a.name),
        email: Set(a.email),
        password_hash: Set(a.password_hash),
        role: Set(a.role.as_i32()),
    }
}

fn category_active(c: Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.id),
        name: Set(c.name),
        description: Set(c.description),
        parent_id: Set(c.parent_id),
        is_active: Set(c.is_active),
    }
}

fn tag_active(t: Tag) -> tag::ActiveModel {
    tag::ActiveModel { id: Set(t.id), name: Set(t.name), note: Set(t.note) }
}

fn article_active(n: NewsArticle) -> news_article::ActiveModel {
    news_article::ActiveModel {
        id: Set(n.id),
        title: Set(n.title),
        headline: Set(n.headline),
        content: Set(n.content),
        source: Set(n.source),
        status: Set(n.status),
        category_id: Set(n.category_id),
        created_by_id: Set(n.created_by_id),
        updated_by_id: Set(n.updated_by_id),
        created_at: Set(n.created_at.into()),
        modified_at: Set(n.modified_at.map(Into::into)),
    }
}

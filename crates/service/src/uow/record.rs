use uuid::Uuid;

use crate::domain::{Account, Category, NewsArticle, Tag};

/// Which table a record or change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Category,
    Tag,
    NewsArticle,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Category => "category",
            EntityKind::Tag => "tag",
            EntityKind::NewsArticle => "news article",
        }
    }
}

/// A row of any persisted entity, as handed to and from a [`Store`](super::Store).
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Account(Account),
    Category(Category),
    Tag(Tag),
    NewsArticle(NewsArticle),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Account(_) => EntityKind::Account,
            Record::Category(_) => EntityKind::Category,
            Record::Tag(_) => EntityKind::Tag,
            Record::NewsArticle(_) => EntityKind::NewsArticle,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Record::Account(a) => a.id,
            Record::Category(c) => c.id,
            Record::Tag(t) => t.id,
            Record::NewsArticle(n) => n.id,
        }
    }
}

/// An entity type the unit of work knows how to persist.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Uuid;
    fn into_record(self) -> Record;
    /// Returns `None` when the record belongs to another kind.
    fn from_record(record: Record) -> Option<Self>;
}

/// A staged mutation waiting for `save_changes`.
#[derive(Debug, Clone)]
pub enum Change {
    Insert(Record),
    Update(Record),
    Delete { kind: EntityKind, id: Uuid },
}

impl Change {
    pub fn kind(&self) -> EntityKind {
        match self {
            Change::Insert(r) | Change::Update(r) => r.kind(),
            Change::Delete { kind, .. } => *kind,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Change::Insert(r) | Change::Update(r) => r.id(),
            Change::Delete { id, .. } => *id,
        }
    }
}

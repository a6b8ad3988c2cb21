//! Persisted entities as the services see them.
//!
//! These are storage-agnostic: the SeaORM store maps them to and from the
//! `models` crate, the memory store keeps them as they are.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::uow::{Entity, EntityKind, Record};

/// Account role. Serialized as its numeric value (1, 2, 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    Staff = 1,
    Lecturer = 2,
    Admin = 3,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Staff => "Staff",
            Role::Lecturer => "Lecturer",
            Role::Admin => "Admin",
        }
    }

    pub fn as_i32(self) -> i32 { self as i32 }

    /// Display name for a raw role value, `"Unknown"` outside 1..=3.
    pub fn name_of(value: i32) -> &'static str {
        Role::try_from(value).map(Role::name).unwrap_or("Unknown")
    }
}

impl TryFrom<i32> for Role {
    type Error = ServiceError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Staff),
            2 => Ok(Role::Lecturer),
            3 => Ok(Role::Admin),
            other => Err(ServiceError::Validation(format!("unknown role {other}"))),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self { role.as_i32() }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub id: Uuid,
    pub title: String,
    pub headline: String,
    pub content: String,
    pub source: String,
    /// `true` means published/active.
    pub status: bool,
    pub category_id: Uuid,
    pub created_by_id: Uuid,
    pub updated_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Associated tags, no duplicates.
    pub tag_ids: Vec<Uuid>,
}

impl Entity for Account {
    const KIND: EntityKind = EntityKind::Account;

    fn id(&self) -> Uuid { self.id }

    fn into_record(self) -> Record { Record::Account(self) }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Account(a) => Some(a),
            _ => None,
        }
    }
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> Uuid { self.id }

    fn into_record(self) -> Record { Record::Category(self) }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Category(c) => Some(c),
            _ => None,
        }
    }
}

impl Entity for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    fn id(&self) -> Uuid { self.id }

    fn into_record(self) -> Record { Record::Tag(self) }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Tag(t) => Some(t),
            _ => None,
        }
    }
}

impl Entity for NewsArticle {
    const KIND: EntityKind = EntityKind::NewsArticle;

    fn id(&self) -> Uuid { self.id }

    fn into_record(self) -> Record { Record::NewsArticle(self) }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::NewsArticle(n) => Some(n),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Tag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub tag_name: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTagRequest {
    pub tag_id: Uuid,
    pub tag_name: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResponse {
    pub tag_id: Uuid,
    pub tag_name: String,
    pub note: String,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self { tag_id: t.id, tag_name: t.name, note: t.note }
    }
}

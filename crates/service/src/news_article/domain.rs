use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tag::domain::TagResponse;

fn default_status() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsArticleRequest {
    pub news_title: String,
    pub headline: String,
    pub news_content: String,
    #[serde(default)]
    pub news_source: String,
    pub category_id: Uuid,
    #[serde(default = "default_status")]
    pub news_status: bool,
    /// Unknown ids are ignored.
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNewsArticleRequest {
    pub news_article_id: Uuid,
    pub news_title: String,
    pub headline: String,
    pub news_content: String,
    #[serde(default)]
    pub news_source: String,
    pub category_id: Uuid,
    #[serde(default = "default_status")]
    pub news_status: bool,
    /// `None` leaves the tag set alone, `Some(vec![])` clears it.
    #[serde(default)]
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Article with its category, author names and tags resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticleResponse {
    pub news_article_id: Uuid,
    pub news_title: String,
    pub headline: String,
    pub created_date: DateTime<Utc>,
    pub news_content: String,
    pub news_source: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub news_status: bool,
    pub created_by_id: Uuid,
    pub created_by_name: Option<String>,
    pub updated_by_id: Option<Uuid>,
    pub updated_by_name: Option<String>,
    pub modified_date: Option<DateTime<Utc>>,
    pub tags: Vec<TagResponse>,
}

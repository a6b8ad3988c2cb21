use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_active() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub category_name: String,
    #[serde(default)]
    pub category_description: String,
    #[serde(default)]
    pub parent_category_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category_id: Uuid,
    pub category_name: String,
    #[serde(default)]
    pub category_description: String,
    #[serde(default)]
    pub parent_category_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_description: String,
    pub parent_category_id: Option<Uuid>,
    pub parent_category_name: Option<String>,
    pub is_active: bool,
    pub news_article_count: usize,
}

/// A category together with its direct children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub sub_categories: Vec<CategoryResponse>,
}

use std::collections::HashMap;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{CategoryDetailResponse, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::{Category, NewsArticle};
use crate::errors::ServiceError;
use crate::uow::UnitOfWork;

pub struct CategoryService {
    uow: UnitOfWork,
}

impl CategoryService {
    pub fn new(uow: UnitOfWork) -> Self { Self { uow } }

    pub async fn get_all(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.uow.repository::<Category>().get_all().await?;
        self.project(categories).await
    }

    /// Category with its direct sub-categories, `None` if unknown.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CategoryDetailResponse>, ServiceError> {
        let all = self.uow.repository::<Category>().get_all().await?;
        let Some(category) = all.iter().find(|c| c.id == id).cloned() else {
            return Ok(None);
        };
        let children: Vec<Category> = all.iter().filter(|c| c.parent_id == Some(id)).cloned().collect();
        let counts = self.article_counts().await?;
        Ok(Some(CategoryDetailResponse {
            category: to_response(category, &all, &counts),
            sub_categories: children.into_iter().map(|c| to_response(c, &all, &counts)).collect(),
        }))
    }

    pub async fn get_active(&self) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self.uow.repository::<Category>().find(&|c: &Category| c.is_active).await?;
        self.project(categories).await
    }

    /// Direct children of `parent_id`, or the root categories when `None`.
    pub async fn get_sub_categories(&self, parent_id: Option<Uuid>) -> Result<Vec<CategoryResponse>, ServiceError> {
        let categories = self
            .uow
            .repository::<Category>()
            .find(&|c: &Category| c.parent_id == parent_id)
            .await?;
        self.project(categories).await
    }

    #[instrument(skip(self, req), fields(name = %req.category_name))]
    pub async fn create(&self, req: CreateCategoryRequest) -> Result<CategoryResponse, ServiceError> {
        let categories = self.uow.repository::<Category>();
        if let Some(parent) = req.parent_category_id {
            if categories.get_by_id(parent).await?.is_none() {
                return Err(ServiceError::Validation("Parent category does not exist".into()));
            }
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: req.category_name,
            description: req.category_description,
            parent_id: req.parent_category_id,
            is_active: req.is_active,
        };
        let id = category.id;
        categories.add(category).await;
        self.uow.save_changes().await?;
        info!(category_id = %id, "category_created");

        self.get_one(id).await
    }

    #[instrument(skip(self, req), fields(category_id = %req.category_id))]
    pub async fn update(&self, req: UpdateCategoryRequest) -> Result<CategoryResponse, ServiceError> {
        let categories = self.uow.repository::<Category>();
        let mut category = categories
            .get_by_id(req.category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("category"))?;

        if let Some(parent) = req.parent_category_id {
            // only the direct self-reference is rejected; longer cycles are not detected
            if parent == req.category_id {
                return Err(ServiceError::Validation("Category cannot be its own parent".into()));
            }
            if categories.get_by_id(parent).await?.is_none() {
                return Err(ServiceError::Validation("Parent category does not exist".into()));
            }
        }

        category.name = req.category_name;
        category.description = req.category_description;
        category.parent_id = req.parent_category_id;
        category.is_active = req.is_active;
        categories.update(category).await;
        self.uow.save_changes().await?;
        info!("category_updated");

        self.get_one(req.category_id).await
    }

    /// Delete a category that has neither articles nor sub-categories.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let categories = self.uow.repository::<Category>();
        let category = categories.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("category"))?;

        if self
            .uow
            .repository::<NewsArticle>()
            .exists(&|n: &NewsArticle| n.category_id == id)
            .await?
        {
            debug!("category still has articles");
            return Err(ServiceError::Conflict("Cannot delete category that has associated news articles".into()));
        }
        if categories.exists(&|c: &Category| c.parent_id == Some(id)).await? {
            debug!("category still has children");
            return Err(ServiceError::Conflict("Cannot delete category that has sub-categories".into()));
        }

        categories.delete(&category).await;
        self.uow.save_changes().await?;
        info!("category_deleted");
        Ok(())
    }

    async fn get_one(&self, id: Uuid) -> Result<CategoryResponse, ServiceError> {
        self.get_by_id(id)
            .await?
            .map(|detail| detail.category)
            .ok_or_else(|| ServiceError::not_found("category"))
    }

    async fn project(&self, categories: Vec<Category>) -> Result<Vec<CategoryResponse>, ServiceError> {
        let all = self.uow.repository::<Category>().get_all().await?;
        let counts = self.article_counts().await?;
        Ok(categories.into_iter().map(|c| to_response(c, &all, &counts)).collect())
    }

    async fn article_counts(&self) -> Result<HashMap<Uuid, usize>, ServiceError> {
        let mut counts = HashMap::new();
        for article in self.uow.repository::<NewsArticle>().get_all().await? {
            *counts.entry(article.category_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

fn to_response(category: Category, all: &[Category], counts: &HashMap<Uuid, usize>) -> CategoryResponse {
    let parent_name = category
        .parent_id
        .and_then(|p| all.iter().find(|c| c.id == p))
        .map(|p| p.name.clone());
    CategoryResponse {
        category_id: category.id,
        news_article_count: counts.get(&category.id).copied().unwrap_or(0),
        category_name: category.name,
        category_description: category.description,
        parent_category_id: category.parent_id,
        parent_category_name: parent_name,
        is_active: category.is_active,
    }
}

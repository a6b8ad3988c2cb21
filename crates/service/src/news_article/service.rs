use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CreateNewsArticleRequest, NewsArticleResponse, UpdateNewsArticleRequest};
use crate::domain::{Account, Category, NewsArticle, Tag};
use crate::errors::ServiceError;
use crate::tag::domain::TagResponse;
use crate::uow::UnitOfWork;

pub struct NewsArticleService {
    uow: UnitOfWork,
}

impl NewsArticleService {
    pub fn new(uow: UnitOfWork) -> Self { Self { uow } }

    pub async fn get_all(&self) -> Result<Vec<NewsArticleResponse>, ServiceError> {
        let articles = self.uow.repository::<NewsArticle>().get_all().await?;
        self.project(articles).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<NewsArticleResponse>, ServiceError> {
        match self.uow.repository::<NewsArticle>().get_by_id(id).await? {
            Some(article) => Ok(self.project(vec![article]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_by_category(&self, category_id: Uuid) -> Result<Vec<NewsArticleResponse>, ServiceError> {
        let articles = self
            .uow
            .repository::<NewsArticle>()
            .find(&|n: &NewsArticle| n.category_id == category_id)
            .await?;
        self.project(articles).await
    }

    pub async fn get_by_tag(&self, tag_id: Uuid) -> Result<Vec<NewsArticleResponse>, ServiceError> {
        let articles = self
            .uow
            .repository::<NewsArticle>()
            .find(&|n: &NewsArticle| n.tag_ids.contains(&tag_id))
            .await?;
        self.project(articles).await
    }

    /// Published articles only.
    pub async fn get_active(&self) -> Result<Vec<NewsArticleResponse>, ServiceError> {
        let articles = self.uow.repository::<NewsArticle>().find(&|n: &NewsArticle| n.status).await?;
        self.project(articles).await
    }

    #[instrument(skip(self, req), fields(title = %req.news_title, created_by = %created_by_id))]
    pub async fn create(
        &self,
        req: CreateNewsArticleRequest,
        created_by_id: Uuid,
    ) -> Result<NewsArticleResponse, ServiceError> {
        if self.uow.repository::<Category>().get_by_id(req.category_id).await?.is_none() {
            return Err(ServiceError::Validation("Category does not exist".into()));
        }
        if self.uow.repository::<Account>().get_by_id(created_by_id).await?.is_none() {
            return Err(ServiceError::Validation("Creator account does not exist".into()));
        }

        let article = NewsArticle {
            id: Uuid::new_v4(),
            title: req.news_title,
            headline: req.headline,
            content: req.news_content,
            source: req.news_source,
            status: req.news_status,
            category_id: req.category_id,
            created_by_id,
            updated_by_id: None,
            created_at: Utc::now(),
            modified_at: None,
            tag_ids: self.resolve_tags(&req.tag_ids).await?,
        };
        let id = article.id;
        self.uow.repository::<NewsArticle>().add(article).await;
        let affected = self.uow.save_changes().await?;
        info!(news_article_id = %id, affected, "news_article_created");

        self.get_one(id).await
    }

    #[instrument(skip(self, req), fields(news_article_id = %req.news_article_id, updated_by = %updated_by_id))]
    pub async fn update(
        &self,
        req: UpdateNewsArticleRequest,
        updated_by_id: Uuid,
    ) -> Result<NewsArticleResponse, ServiceError> {
        let articles = self.uow.repository::<NewsArticle>();
        let mut article = articles
            .get_by_id(req.news_article_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("news article"))?;
        if self.uow.repository::<Category>().get_by_id(req.category_id).await?.is_none() {
            return Err(ServiceError::Validation("Category does not exist".into()));
        }
        if self.uow.repository::<Account>().get_by_id(updated_by_id).await?.is_none() {
            return Err(ServiceError::Validation("Updater account does not exist".into()));
        }

        article.title = req.news_title;
        article.headline = req.headline;
        article.content = req.news_content;
        article.source = req.news_source;
        article.status = req.news_status;
        article.category_id = req.category_id;
        article.updated_by_id = Some(updated_by_id);
        article.modified_at = Some(Utc::now());
        if let Some(tag_ids) = &req.tag_ids {
            article.tag_ids = self.resolve_tags(tag_ids).await?;
        }
        articles.update(article).await;
        let affected = self.uow.save_changes().await?;
        info!(affected, "news_article_updated");

        self.get_one(req.news_article_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let articles = self.uow.repository::<NewsArticle>();
        let article = articles.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("news article"))?;
        articles.delete(&article).await;
        self.uow.save_changes().await?;
        info!("news_article_deleted");
        Ok(())
    }

    /// Keep only ids of existing tags, each once, in tag storage order.
    async fn resolve_tags(&self, requested: &[Uuid]) -> Result<Vec<Uuid>, ServiceError> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        let found = self.uow.repository::<Tag>().find(&|t: &Tag| requested.contains(&t.id)).await?;
        Ok(found.into_iter().map(|t| t.id).collect())
    }

    async fn get_one(&self, id: Uuid) -> Result<NewsArticleResponse, ServiceError> {
        self.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("news article"))
    }

    async fn project(&self, articles: Vec<NewsArticle>) -> Result<Vec<NewsArticleResponse>, ServiceError> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }
        let categories: HashMap<Uuid, String> = self
            .uow
            .repository::<Category>()
            .get_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let accounts: HashMap<Uuid, String> = self
            .uow
            .repository::<Account>()
            .get_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();
        let tags: HashMap<Uuid, Tag> = self
            .uow
            .repository::<Tag>()
            .get_all()
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(articles
            .into_iter()
            .map(|n| NewsArticleResponse {
                news_article_id: n.id,
                category_name: categories.get(&n.category_id).cloned(),
                created_by_name: accounts.get(&n.created_by_id).cloned(),
                updated_by_name: n.updated_by_id.and_then(|u| accounts.get(&u).cloned()),
                tags: n.tag_ids.iter().filter_map(|t| tags.get(t).cloned().map(TagResponse::from)).collect(),
                news_title: n.title,
                headline: n.headline,
                created_date: n.created_at,
                news_content: n.content,
                news_source: n.source,
                category_id: n.category_id,
                news_status: n.status,
                created_by_id: n.created_by_id,
                updated_by_id: n.updated_by_id,
                modified_date: n.modified_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::test_support::{memory_store, seed_account, seed_article, seed_category, seed_tag, uow};
    use crate::uow::memory::MemoryStore;
    use std::sync::Arc;

    fn svc(store: &Arc<MemoryStore>) -> NewsArticleService {
        NewsArticleService::new(uow(store))
    }

    fn create_req(category_id: Uuid, tag_ids: Vec<Uuid>) -> CreateNewsArticleRequest {
        CreateNewsArticleRequest {
            news_title: "Launch".into(),
            headline: "Rocket launched".into(),
            news_content: "It flew.".into(),
            news_source: "Agency".into(),
            category_id,
            news_status: true,
            tag_ids,
        }
    }

    fn update_req(id: Uuid, category_id: Uuid, tag_ids: Option<Vec<Uuid>>) -> UpdateNewsArticleRequest {
        UpdateNewsArticleRequest {
            news_article_id: id,
            news_title: "Launch (updated)".into(),
            headline: "Rocket landed".into(),
            news_content: "It flew and landed.".into(),
            news_source: "Agency".into(),
            category_id,
            news_status: false,
            tag_ids,
        }
    }

    #[tokio::test]
    async fn create_resolves_names_and_ignores_unknown_tags() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let cat = seed_category(&store, "Science", None, true).await;
        let space = seed_tag(&store, "Space").await;

        let created = svc(&store)
            .create(create_req(cat.id, vec![space.id, Uuid::new_v4(), space.id]), author.id)
            .await?;
        assert_eq!(created.category_name.as_deref(), Some("Science"));
        assert_eq!(created.created_by_name.as_deref(), Some("Author"));
        assert_eq!(created.updated_by_id, None);
        assert_eq!(created.modified_date, None);
        assert_eq!(created.tags.len(), 1);
        assert_eq!(created.tags[0].tag_name, "Space");
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_category_and_creator() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let cat = seed_category(&store, "Science", None, true).await;

        let err = svc(&store).create(create_req(Uuid::new_v4(), vec![]), author.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == "Category does not exist"));
        let err = svc(&store).create(create_req(cat.id, vec![]), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == "Creator account does not exist"));
        assert!(svc(&store).get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_stamps_updater_and_handles_tags() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let editor = seed_account(&store, "Editor", "editor@example.com", "pw1234", Role::Staff).await;
        let cat = seed_category(&store, "Science", None, true).await;
        let space = seed_tag(&store, "Space").await;
        let mars = seed_tag(&store, "Mars").await;
        let story = seed_article(&store, "Launch", cat.id, author.id, vec![space.id], true).await;

        // tag list omitted: tags unchanged
        let updated = svc(&store).update(update_req(story.id, cat.id, None), editor.id).await?;
        assert_eq!(updated.updated_by_id, Some(editor.id));
        assert_eq!(updated.updated_by_name.as_deref(), Some("Editor"));
        assert!(updated.modified_date.is_some());
        assert!(!updated.news_status);
        assert_eq!(updated.tags.iter().map(|t| t.tag_id).collect::<Vec<_>>(), vec![space.id]);

        let replaced = svc(&store).update(update_req(story.id, cat.id, Some(vec![mars.id])), editor.id).await?;
        assert_eq!(replaced.tags.iter().map(|t| t.tag_id).collect::<Vec<_>>(), vec![mars.id]);

        let cleared = svc(&store).update(update_req(story.id, cat.id, Some(vec![])), editor.id).await?;
        assert!(cleared.tags.is_empty());
        assert_eq!(cleared.created_by_id, author.id);
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_article_then_category_then_updater() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let cat = seed_category(&store, "Science", None, true).await;
        let story = seed_article(&store, "Launch", cat.id, author.id, vec![], true).await;

        let missing = svc(&store).update(update_req(Uuid::new_v4(), Uuid::new_v4(), None), author.id).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        let bad_cat = svc(&store).update(update_req(story.id, Uuid::new_v4(), None), author.id).await;
        assert!(matches!(bad_cat, Err(ServiceError::Validation(msg)) if msg == "Category does not exist"));
        let bad_updater = svc(&store).update(update_req(story.id, cat.id, None), Uuid::new_v4()).await;
        assert!(matches!(bad_updater, Err(ServiceError::Validation(msg)) if msg == "Updater account does not exist"));
        Ok(())
    }

    #[tokio::test]
    async fn listings_filter_by_category_tag_and_status() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let science = seed_category(&store, "Science", None, true).await;
        let sport = seed_category(&store, "Sport", None, true).await;
        let space = seed_tag(&store, "Space").await;
        seed_article(&store, "A", science.id, author.id, vec![space.id], true).await;
        seed_article(&store, "B", science.id, author.id, vec![], false).await;
        seed_article(&store, "C", sport.id, author.id, vec![space.id], true).await;

        assert_eq!(svc(&store).get_all().await?.len(), 3);
        assert_eq!(svc(&store).get_by_category(science.id).await?.len(), 2);
        let tagged = svc(&store).get_by_tag(space.id).await?;
        assert_eq!(tagged.iter().map(|n| n.news_title.as_str()).collect::<Vec<_>>(), vec!["A", "C"]);
        let active = svc(&store).get_active().await?;
        assert!(active.iter().all(|n| n.news_status));
        assert_eq!(active.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_lookup_is_absent() -> Result<(), anyhow::Error> {
        let store = memory_store();
        let author = seed_account(&store, "Author", "author@example.com", "pw1234", Role::Staff).await;
        let cat = seed_category(&store, "Science", None, true).await;
        let story = seed_article(&store, "Launch", cat.id, author.id, vec![], true).await;

        svc(&store).delete(story.id).await?;
        assert!(svc(&store).get_by_id(story.id).await?.is_none());
        assert!(matches!(svc(&store).delete(story.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::domain::Tag;
use crate::errors::ServiceError;
use crate::uow::UnitOfWork;

pub struct TagService {
    uow: UnitOfWork,
}

impl TagService {
    pub fn new(uow: UnitOfWork) -> Self { Self { uow } }

    pub async fn get_all(&self) -> Result<Vec<TagResponse>, ServiceError> {
        let tags = self.uow.repository::<Tag>().get_all().await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TagResponse>, ServiceError> {
        Ok(self.uow.repository::<Tag>().get_by_id(id).await?.map(TagResponse::from))
    }

    /// Create a tag. Names are unique ignoring case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::tag::{domain::CreateTagRequest, TagService};
    /// use service::uow::{memory::MemoryStore, UnitOfWork};
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let svc = TagService::new(UnitOfWork::new(store.clone()));
    /// tokio_test::block_on(svc.create(CreateTagRequest { tag_name: "Rust".into(), note: String::new() })).unwrap();
    /// let again = TagService::new(UnitOfWork::new(store));
    /// assert!(tokio_test::block_on(again.create(CreateTagRequest { tag_name: "rust".into(), note: String::new() })).is_err());
    /// ```
    #[instrument(skip(self, req), fields(name = %req.tag_name))]
    pub async fn create(&self, req: CreateTagRequest) -> Result<TagResponse, ServiceError> {
        let tags = self.uow.repository::<Tag>();
        let wanted = req.tag_name.to_lowercase();
        if tags.exists(&|t: &Tag| t.name.to_lowercase() == wanted).await? {
            return Err(ServiceError::Validation("Tag name already exists".into()));
        }

        let tag = Tag { id: Uuid::new_v4(), name: req.tag_name, note: req.note };
        tags.add(tag.clone()).await;
        self.uow.save_changes().await?;
        info!(tag_id = %tag.id, "tag_created");
        Ok(tag.into())
    }

    #[instrument(skip(self, req), fields(tag_id = %req.tag_id))]
    pub async fn update(&self, req: UpdateTagRequest) -> Result<TagResponse, ServiceError> {
        let tags = self.uow.repository::<Tag>();
        let mut tag = tags.get_by_id(req.tag_id).await?.ok_or_else(|| ServiceError::not_found("tag"))?;

        let (id, wanted) = (req.tag_id, req.tag_name.to_lowercase());
        if tags.exists(&|t: &Tag| t.id != id && t.name.to_lowercase() == wanted).await? {
            return Err(ServiceError::Validation("Tag name already exists".into()));
        }

        tag.name = req.tag_name;
        tag.note = req.note;
        tags.update(tag.clone()).await;
        self.uow.save_changes().await?;
        info!("tag_updated");
        Ok(tag.into())
    }

    /// Delete a tag; its article associations disappear with it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let tags = self.uow.repository::<Tag>();
        let tag = tags.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found("tag"))?;
        tags.delete(&tag).await;
        self.uow.save_changes().await?;
        info!("tag_deleted");
        Ok(())
    }
}

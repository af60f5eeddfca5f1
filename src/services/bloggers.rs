use crate::{
    error::{ServiceError, ServiceResult},
    models::{Blogger, BloggerInput, BloggerView},
    repository::BloggersRepository,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct BloggersService {
    repo: Arc<dyn BloggersRepository>,
}

impl BloggersService {
    pub fn new(repo: Arc<dyn BloggersRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, search_name: Option<&str>) -> ServiceResult<Vec<BloggerView>> {
        let bloggers = self.repo.find_all(search_name).await?;
        Ok(bloggers.into_iter().map(BloggerView::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<BloggerView> {
        self.repo
            .find(id)
            .await?
            .map(BloggerView::from)
            .ok_or(ServiceError::NotFound { entity: "blogger", id })
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: BloggerInput) -> ServiceResult<BloggerView> {
        let blogger = Blogger {
            id: Uuid::new_v4(),
            name: input.name,
            youtube_url: input.youtube_url,
            created_at: Utc::now(),
        };
        self.repo.insert(&blogger).await?;
        info!(blogger_id = %blogger.id, "blogger created");
        Ok(blogger.into())
    }

    /// Renames a blogger. Posts keep the name they copied when they were written.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: BloggerInput) -> ServiceResult<()> {
        if !self.repo.update(id, &input).await? {
            return Err(ServiceError::TargetMissing { entity: "blogger", id });
        }
        Ok(())
    }

    /// Deletes the blogger only; its posts stay in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::TargetMissing { entity: "blogger", id });
        }
        info!(blogger_id = %id, "blogger deleted");
        Ok(())
    }
}

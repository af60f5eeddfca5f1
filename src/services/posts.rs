use crate::{
    error::{ServiceError, ServiceResult},
    models::{Blogger, Post, PostChanges, PostInput, PostView},
    repository::{BloggersRepository, PostsRepository},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// PostsService
///
/// Owns the one cross-entity rule of posts: the blogger a post names must exist when the post is
/// written. The check and the write are two separate repository calls, so a blogger deleted in
/// between leaves an orphaned post; nothing here tries to prevent that.
#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostsRepository>,
    bloggers: Arc<dyn BloggersRepository>,
}

impl PostsService {
    pub fn new(posts: Arc<dyn PostsRepository>, bloggers: Arc<dyn BloggersRepository>) -> Self {
        Self { posts, bloggers }
    }

    pub async fn list(&self) -> ServiceResult<Vec<PostView>> {
        let posts = self.posts.find_all().await?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<PostView> {
        self.posts
            .find(id)
            .await?
            .map(PostView::from)
            .ok_or(ServiceError::NotFound { entity: "post", id })
    }

    /// Posts of one blogger. Unlike `get`, a missing blogger is a bad reference, not a 404.
    pub async fn list_by_blogger(&self, blogger_id: Uuid) -> ServiceResult<Vec<PostView>> {
        if self.bloggers.find(blogger_id).await?.is_none() {
            return Err(blogger_missing());
        }
        let posts = self.posts.find_by_blogger(blogger_id).await?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }

    #[instrument(skip(self, input), fields(blogger_id = %input.blogger_id))]
    pub async fn create(&self, input: PostInput) -> ServiceResult<PostView> {
        let blogger = self.resolve_blogger(&input.blogger_id).await?;

        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            short_description: input.short_description,
            content: input.content,
            blogger_id: blogger.id,
            blogger_name: blogger.name,
            created_at: Utc::now(),
        };
        self.posts.insert(&post).await?;
        info!(post_id = %post.id, "post created");
        Ok(post.into())
    }

    /// update
    ///
    /// Replaces the editable fields. The blogger is checked first, so a bad `bloggerId` never
    /// touches the stored post; `blogger_name` is refreshed from the blogger just read.
    #[instrument(skip(self, input), fields(blogger_id = %input.blogger_id))]
    pub async fn update(&self, id: Uuid, input: PostInput) -> ServiceResult<()> {
        let blogger = self.resolve_blogger(&input.blogger_id).await?;

        let changes = PostChanges {
            title: input.title,
            short_description: input.short_description,
            content: input.content,
            blogger_id: blogger.id,
            blogger_name: blogger.name,
        };
        if !self.posts.update(id, &changes).await? {
            return Err(ServiceError::TargetMissing { entity: "post", id });
        }
        Ok(())
    }

    /// Deletes the post only; its comments stay in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.posts.delete(id).await? {
            return Err(ServiceError::TargetMissing { entity: "post", id });
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// An id that does not parse as a UUID cannot name a blogger, so it is reported exactly like
    /// one that names nobody.
    async fn resolve_blogger(&self, raw_id: &str) -> ServiceResult<Blogger> {
        let Ok(id) = Uuid::parse_str(raw_id) else {
            warn!(blogger_id = raw_id, "malformed blogger reference");
            return Err(blogger_missing());
        };
        match self.bloggers.find(id).await? {
            Some(blogger) => Ok(blogger),
            None => {
                warn!(blogger_id = %id, "unknown blogger reference");
                Err(blogger_missing())
            }
        }
    }
}

fn blogger_missing() -> ServiceError {
    ServiceError::ReferenceMissing {
        field: "bloggerId",
        message: "Blogger doesn't exist".to_string(),
    }
}

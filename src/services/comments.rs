use crate::{
    auth::AuthUser,
    error::{ServiceError, ServiceResult},
    models::{Comment, CommentView},
    repository::{CommentsRepository, PostsRepository},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentsService {
    comments: Arc<dyn CommentsRepository>,
    posts: Arc<dyn PostsRepository>,
}

impl CommentsService {
    pub fn new(comments: Arc<dyn CommentsRepository>, posts: Arc<dyn PostsRepository>) -> Self {
        Self { comments, posts }
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<CommentView> {
        self.comments
            .find(id)
            .await?
            .map(CommentView::from)
            .ok_or(ServiceError::NotFound { entity: "comment", id })
    }

    /// Comments of a post in the order they were written.
    pub async fn list_for_post(&self, post_id: Uuid) -> ServiceResult<Vec<CommentView>> {
        self.ensure_post(post_id).await?;
        let comments = self.comments.find_by_post(post_id).await?;
        Ok(comments.into_iter().map(CommentView::from).collect())
    }

    /// create
    ///
    /// Attaches a comment to an existing post. The author fields are taken from the
    /// authenticated caller, never from the request body.
    #[instrument(skip(self, content, author), fields(user_id = %author.id))]
    pub async fn create(
        &self,
        post_id: Uuid,
        content: String,
        author: &AuthUser,
    ) -> ServiceResult<CommentView> {
        self.ensure_post(post_id).await?;

        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            content,
            user_id: author.id,
            user_login: author.login.clone(),
            created_at: Utc::now(),
        };
        self.comments.insert(&comment).await?;
        info!(comment_id = %comment.id, "comment created");
        Ok(comment.into())
    }

    #[instrument(skip(self, content))]
    pub async fn update(&self, id: Uuid, content: String, user_id: Uuid) -> ServiceResult<()> {
        self.ensure_author(id, user_id).await?;
        if !self.comments.update_content(id, &content).await? {
            return Err(ServiceError::TargetMissing { entity: "comment", id });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        self.ensure_author(id, user_id).await?;
        if !self.comments.delete(id).await? {
            return Err(ServiceError::TargetMissing { entity: "comment", id });
        }
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn ensure_post(&self, post_id: Uuid) -> ServiceResult<()> {
        if self.posts.find(post_id).await?.is_none() {
            warn!(post_id = %post_id, "unknown post reference");
            return Err(ServiceError::ReferenceMissing {
                field: "postId",
                message: "Post doesn't exist".to_string(),
            });
        }
        Ok(())
    }

    async fn ensure_author(&self, id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let comment = self
            .comments
            .find(id)
            .await?
            .ok_or(ServiceError::TargetMissing { entity: "comment", id })?;
        if comment.user_id != user_id {
            return Err(ServiceError::NotAuthor { comment_id: id, user_id });
        }
        Ok(())
    }
}

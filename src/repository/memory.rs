use super::{BloggersRepository, CommentsRepository, PostsRepository, UsersRepository};
use crate::{
    error::{RepoError, RepoResult},
    models::{Blogger, BloggerInput, Comment, Post, PostChanges, User},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// InMemoryRepository
///
/// Process-local backend used when no `DATABASE_URL` is configured in `Env::Local`, and by the
/// test suite. Each collection is a `Vec` behind its own lock, so listing order is insertion
/// order, as with the `seq` column of the Postgres tables. A lock is never held while another
/// collection is awaited.
#[derive(Default)]
pub struct InMemoryRepository {
    bloggers: RwLock<Vec<Blogger>>,
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
    users: RwLock<Vec<User>>,
}

/// Drops every record the predicate matches; reports whether anything was removed.
fn remove_by<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

#[async_trait]
impl BloggersRepository for InMemoryRepository {
    async fn find_all(&self, search_name: Option<&str>) -> RepoResult<Vec<Blogger>> {
        let bloggers = self.bloggers.read().await;
        let term = search_name.map(str::to_lowercase);
        Ok(bloggers
            .iter()
            .filter(|b| match &term {
                Some(t) => b.name.to_lowercase().contains(t.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Blogger>> {
        Ok(self.bloggers.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blogger: &Blogger) -> RepoResult<()> {
        self.bloggers.write().await.push(blogger.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &BloggerInput) -> RepoResult<bool> {
        let mut bloggers = self.bloggers.write().await;
        match bloggers.iter_mut().find(|b| b.id == id) {
            Some(b) => {
                b.name = changes.name.clone();
                b.youtube_url = changes.youtube_url.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove_by(&mut *self.bloggers.write().await, |b| b.id == id))
    }
}

#[async_trait]
impl PostsRepository for InMemoryRepository {
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_blogger(&self, blogger_id: Uuid) -> RepoResult<Vec<Post>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.blogger_id == blogger_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Post>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: &Post) -> RepoResult<()> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &PostChanges) -> RepoResult<bool> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.title = changes.title.clone();
                p.short_description = changes.short_description.clone();
                p.content = changes.content.clone();
                p.blogger_id = changes.blogger_id;
                p.blogger_name = changes.blogger_name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove_by(&mut *self.posts.write().await, |p| p.id == id))
    }
}

#[async_trait]
impl CommentsRepository for InMemoryRepository {
    async fn find_by_post(&self, post_id: Uuid) -> RepoResult<Vec<Comment>> {
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        Ok(self.comments.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: &Comment) -> RepoResult<()> {
        self.comments.write().await.push(comment.clone());
        Ok(())
    }

    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool> {
        let mut comments = self.comments.write().await;
        match comments.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.content = content.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove_by(&mut *self.comments.write().await, |c| c.id == id))
    }
}

#[async_trait]
impl UsersRepository for InMemoryRepository {
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.login == login).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.login == user.login) {
            return Err(RepoError::Duplicate("login"));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Duplicate("email"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove_by(&mut *self.users.write().await, |u| u.id == id))
    }
}

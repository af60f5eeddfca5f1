use crate::{
    error::RepoResult,
    models::{Blogger, BloggerInput, Comment, Post, PostChanges, User},
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// Repository Traits
///
/// One narrow persistence contract per collection. Handlers never see these; the services do.
/// Each trait is object safe (`async_trait`, `Send + Sync`) so a backend can be shared as
/// `Arc<dyn ...>` across Axum's request tasks.
///
/// `update`/`delete` report whether a record matched instead of failing, which leaves the
/// "missing target" decision to the service.
#[async_trait]
pub trait BloggersRepository: Send + Sync {
    async fn find_all(&self, search_name: Option<&str>) -> RepoResult<Vec<Blogger>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<Blogger>>;
    async fn insert(&self, blogger: &Blogger) -> RepoResult<()>;
    async fn update(&self, id: Uuid, changes: &BloggerInput) -> RepoResult<bool>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait PostsRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Post>>;
    async fn find_by_blogger(&self, blogger_id: Uuid) -> RepoResult<Vec<Post>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<Post>>;
    async fn insert(&self, post: &Post) -> RepoResult<()>;
    async fn update(&self, id: Uuid, changes: &PostChanges) -> RepoResult<bool>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    /// All comments of a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> RepoResult<Vec<Comment>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<Comment>>;
    async fn insert(&self, comment: &Comment) -> RepoResult<()>;
    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<User>>;
    async fn find(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Fails with `RepoError::Duplicate` when the login or e-mail is already stored.
    async fn insert(&self, user: &User) -> RepoResult<()>;
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

/// Repositories
///
/// The set of collection handles the services are built from. Both constructors hand every
/// trait object the same backend instance.
#[derive(Clone)]
pub struct Repositories {
    pub bloggers: Arc<dyn BloggersRepository>,
    pub posts: Arc<dyn PostsRepository>,
    pub comments: Arc<dyn CommentsRepository>,
    pub users: Arc<dyn UsersRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        let backend = Arc::new(PostgresRepository::new(pool));
        Self {
            bloggers: backend.clone(),
            posts: backend.clone(),
            comments: backend.clone(),
            users: backend,
        }
    }

    pub fn in_memory() -> Self {
        let backend = Arc::new(InMemoryRepository::default());
        Self {
            bloggers: backend.clone(),
            posts: backend.clone(),
            comments: backend.clone(),
            users: backend,
        }
    }
}

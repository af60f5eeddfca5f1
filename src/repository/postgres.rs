use super::{BloggersRepository, CommentsRepository, PostsRepository, UsersRepository};
use crate::{
    error::{RepoError, RepoResult},
    models::{Blogger, BloggerInput, Comment, Post, PostChanges, User},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgresRepository
///
/// The concrete implementation of all four repository traits, backed by PostgreSQL.
/// Every collection is a plain table (see `migrations/`); there are no foreign keys, so deletes
/// never cascade. Queries are bound at runtime, and `seq` (a `BIGSERIAL`) gives insertion order.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BloggersRepository for PostgresRepository {
    /// find_all
    ///
    /// Lists bloggers in insertion order. The optional term is a case-insensitive substring
    /// match via `strpos`, so `%`, `_` and `\` in it are plain characters.
    async fn find_all(&self, search_name: Option<&str>) -> RepoResult<Vec<Blogger>> {
        let bloggers = match search_name {
            Some(term) => {
                sqlx::query_as::<_, Blogger>(
                    r#"SELECT id, name, youtube_url, created_at FROM bloggers
                       WHERE strpos(lower(name), lower($1)) > 0 ORDER BY seq"#,
                )
                .bind(term)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Blogger>(
                    "SELECT id, name, youtube_url, created_at FROM bloggers ORDER BY seq",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(bloggers)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Blogger>> {
        let blogger = sqlx::query_as::<_, Blogger>(
            "SELECT id, name, youtube_url, created_at FROM bloggers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(blogger)
    }

    async fn insert(&self, blogger: &Blogger) -> RepoResult<()> {
        sqlx::query("INSERT INTO bloggers (id, name, youtube_url, created_at) VALUES ($1, $2, $3, $4)")
            .bind(blogger.id)
            .bind(&blogger.name)
            .bind(&blogger.youtube_url)
            .bind(blogger.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &BloggerInput) -> RepoResult<bool> {
        let res = sqlx::query("UPDATE bloggers SET name = $2, youtube_url = $3 WHERE id = $1")
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.youtube_url)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM bloggers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

const POST_COLUMNS: &str =
    "id, title, short_description, content, blogger_id, blogger_name, created_at";

#[async_trait]
impl PostsRepository for PostgresRepository {
    async fn find_all(&self) -> RepoResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn find_by_blogger(&self, blogger_id: Uuid) -> RepoResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE blogger_id = $1 ORDER BY seq"
        ))
        .bind(blogger_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn insert(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(&format!(
            "INSERT INTO posts ({POST_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.short_description)
        .bind(&post.content)
        .bind(post.blogger_id)
        .bind(&post.blogger_name)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// update
    ///
    /// Full replacement of the editable fields; `blogger_name` is whatever the service resolved.
    async fn update(&self, id: Uuid, changes: &PostChanges) -> RepoResult<bool> {
        let res = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2,
                short_description = $3,
                content = $4,
                blogger_id = $5,
                blogger_name = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.short_description)
        .bind(&changes.content)
        .bind(changes.blogger_id)
        .bind(&changes.blogger_name)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

const COMMENT_COLUMNS: &str = "id, post_id, content, user_id, user_login, created_at";

#[async_trait]
impl CommentsRepository for PostgresRepository {
    async fn find_by_post(&self, post_id: Uuid) -> RepoResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY seq"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn insert(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(&format!(
            "INSERT INTO comments ({COMMENT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(comment.user_id)
        .bind(&comment.user_login)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_content(&self, id: Uuid, content: &str) -> RepoResult<bool> {
        let res = sqlx::query("UPDATE comments SET content = $2 WHERE id = $1")
            .bind(id)
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

const USER_COLUMNS: &str = "id, login, email, password_hash, created_at";

#[async_trait]
impl UsersRepository for PostgresRepository {
    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY seq"))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE login = $1"))
                .bind(login)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    /// insert
    ///
    /// The `UNIQUE` constraints on `login` and `email` close the race left open by the service's
    /// lookup-then-insert; a violation is reported as `RepoError::Duplicate` naming the column.
    async fn insert(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5)"
        ))
        .bind(user.id)
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                let field = match db.constraint() {
                    Some("users_email_key") => "email",
                    _ => "login",
                };
                Err(RepoError::Duplicate(field))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

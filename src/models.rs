use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Stored Records (Mapped to Database) ---

/// Blogger
///
/// Author record from the `bloggers` table. Posts point at it through `blogger_id`, but the
/// reference is only checked by the services, never by the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Blogger {
    pub id: Uuid,
    pub name: String,
    pub youtube_url: String,
    pub created_at: DateTime<Utc>,
}

/// Post
///
/// Record from the `posts` table. `blogger_name` is a copy of the blogger's name taken when the
/// post was written (or last updated); renaming or deleting the blogger leaves it stale.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blogger_id: Uuid,
    pub blogger_name: String,
    pub created_at: DateTime<Utc>,
}

/// Comment
///
/// Record from the `comments` table. Survives the deletion of its post.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub user_login: String,
    pub created_at: DateTime<Utc>,
}

/// User
///
/// Account record from the `users` table. The password is only ever stored as an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Field set written by a post update. Built by the posts service once the blogger is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChanges {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blogger_id: Uuid,
    pub blogger_name: String,
}

// --- Request Payloads (Input Schemas) ---

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// BloggerInput
///
/// Body of `POST /bloggers` and `PUT /bloggers/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
// Missing fields fall back to empty so validation reports them by name.
#[serde(default)]
pub struct BloggerInput {
    #[validate(
        length(min = 1, max = 15, message = "name length must be between 1 and 15"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "youtubeUrl length must be between 1 and 100"),
        url(message = "youtubeUrl must be a valid URL")
    )]
    pub youtube_url: String,
}

/// PostInput
///
/// Body of `POST /posts` and `PUT /posts/{id}`. `blogger_id` stays a string so that an id which
/// is not even a UUID is reported the same way as one that points nowhere.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct PostInput {
    #[validate(
        length(min = 1, max = 30, message = "title length must be between 1 and 30"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(length(max = 100, message = "shortDescription length must be at most 100"))]
    pub short_description: String,
    #[validate(length(min = 1, max = 1000, message = "content length must be between 1 and 1000"))]
    pub content: String,
    #[validate(length(min = 1, message = "bloggerId is required"))]
    pub blogger_id: String,
}

/// BloggerPostInput
///
/// Body of `POST /bloggers/{id}/posts`; the blogger comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct BloggerPostInput {
    #[validate(
        length(min = 1, max = 30, message = "title length must be between 1 and 30"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(length(max = 100, message = "shortDescription length must be at most 100"))]
    pub short_description: String,
    #[validate(length(min = 1, max = 1000, message = "content length must be between 1 and 1000"))]
    pub content: String,
}

impl BloggerPostInput {
    /// Lifts the payload into a full `PostInput` addressed at `blogger_id`.
    pub fn with_blogger(self, blogger_id: Uuid) -> PostInput {
        PostInput {
            title: self.title,
            short_description: self.short_description,
            content: self.content,
            blogger_id: blogger_id.to_string(),
        }
    }
}

/// CommentInput
///
/// Body of `POST /posts/{id}/comments` and `PUT /comments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default)]
pub struct CommentInput {
    #[validate(length(min = 1, max = 300, message = "content length must be between 1 and 300"))]
    pub content: String,
}

/// UserInput
///
/// Body of `POST /users`. The password never leaves the users service in clear text.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default)]
pub struct UserInput {
    #[validate(
        length(min = 3, max = 10, message = "login length must be between 3 and 10"),
        custom(function = "not_blank")
    )]
    pub login: String,
    #[validate(length(min = 6, max = 20, message = "password length must be between 6 and 20"))]
    pub password: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

/// LoginInput
///
/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Query string of `GET /bloggers`.
#[derive(Debug, Clone, Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct BloggerFilter {
    /// Case-insensitive substring matched against the blogger name.
    pub search_name_term: Option<String>,
}

// --- Response Payloads (Output Schemas) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BloggerView {
    pub id: Uuid,
    pub name: String,
    pub youtube_url: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<Blogger> for BloggerView {
    fn from(b: Blogger) -> Self {
        Self {
            id: b.id,
            name: b.name,
            youtube_url: b.youtube_url,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blogger_id: Uuid,
    pub blogger_name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            short_description: p.short_description,
            content: p.content,
            blogger_id: p.blogger_id,
            blogger_name: p.blogger_name,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub user_login: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            content: c.content,
            user_id: c.user_id,
            user_login: c.user_login,
            created_at: c.created_at,
        }
    }
}

/// UserView
///
/// Public projection of `User`: everything except the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub login: String,
    pub email: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            login: u.login,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub access_token: String,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MeView {
    pub user_id: Uuid,
    pub login: String,
    pub email: String,
}

use crate::{
    AppState,
    auth::AuthUser,
    error::{ApiError, ErrorsBody},
    extract::ValidatedJson,
    models::{CommentInput, CommentView, PostInput, PostView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// get_posts
///
/// [Public Route] Lists every post in insertion order.
#[utoipa::path(
    get,
    path = "/posts",
    responses((status = 200, description = "All posts", body = [PostView]))
)]
pub async fn get_posts(State(state): State<AppState>) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

/// get_post
///
/// [Public Route] A single post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Found", body = PostView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostView>, ApiError> {
    Ok(Json(state.posts.get(id).await?))
}

/// create_post
///
/// [Admin Route] Writes a post for an existing blogger. `bloggerName` is copied from the
/// blogger at this moment. An unknown `bloggerId` is a 400 and nothing is stored.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostInput,
    responses(
        (status = 201, description = "Created", body = PostView),
        (status = 400, description = "Invalid input or unknown blogger", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PostInput>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let post = state.posts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// update_post
///
/// [Admin Route] Full replacement of a post. Both an unknown blogger and an unknown post are
/// reported as 400; the stored post is untouched in either case.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = PostInput,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid input, unknown blogger or unknown post", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PostInput>,
) -> Result<StatusCode, ApiError> {
    state.posts.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// delete_post
///
/// [Admin Route] Removes a post. Its comments are left in place.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Unknown post", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// get_post_comments
///
/// [Public Route] Comments of a post, oldest first. A missing post is a structured 400.
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments", body = [CommentView]),
        (status = 400, description = "Unknown post", body = ErrorsBody)
    )
)]
pub async fn get_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    Ok(Json(state.comments.list_for_post(post_id).await?))
}

/// create_post_comment
///
/// [Authenticated Route] Comments on a post as the Bearer-authenticated user.
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = CommentInput,
    responses(
        (status = 200, description = "Comment created", body = CommentView),
        (status = 400, description = "Invalid content or unknown post", body = ErrorsBody),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_post_comment(
    author: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CommentInput>,
) -> Result<Json<CommentView>, ApiError> {
    let comment = state
        .comments
        .create(post_id, payload.content, &author)
        .await?;
    Ok(Json(comment))
}

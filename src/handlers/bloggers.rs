use crate::{
    AppState,
    error::{ApiError, ErrorsBody},
    extract::ValidatedJson,
    models::{BloggerFilter, BloggerInput, BloggerPostInput, BloggerView, PostView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

/// get_bloggers
///
/// [Public Route] Lists bloggers, optionally filtered by `searchNameTerm`.
#[utoipa::path(
    get,
    path = "/bloggers",
    params(BloggerFilter),
    responses((status = 200, description = "Bloggers", body = [BloggerView]))
)]
pub async fn get_bloggers(
    State(state): State<AppState>,
    Query(filter): Query<BloggerFilter>,
) -> Result<Json<Vec<BloggerView>>, ApiError> {
    let term = filter.search_name_term.as_deref().filter(|t| !t.is_empty());
    Ok(Json(state.bloggers.list(term).await?))
}

#[utoipa::path(
    get,
    path = "/bloggers/{id}",
    params(("id" = Uuid, Path, description = "Blogger ID")),
    responses(
        (status = 200, description = "Found", body = BloggerView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_blogger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BloggerView>, ApiError> {
    Ok(Json(state.bloggers.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/bloggers",
    request_body = BloggerInput,
    responses(
        (status = 201, description = "Created", body = BloggerView),
        (status = 400, description = "Invalid input", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn create_blogger(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BloggerInput>,
) -> Result<(StatusCode, Json<BloggerView>), ApiError> {
    let blogger = state.bloggers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(blogger)))
}

/// update_blogger
///
/// [Admin Route] Replaces name and channel URL. Existing posts keep the old `bloggerName`.
#[utoipa::path(
    put,
    path = "/bloggers/{id}",
    params(("id" = Uuid, Path, description = "Blogger ID")),
    request_body = BloggerInput,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid input or unknown blogger", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn update_blogger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<BloggerInput>,
) -> Result<StatusCode, ApiError> {
    state.bloggers.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// delete_blogger
///
/// [Admin Route] Removes a blogger; their posts survive with a dangling `bloggerId`.
#[utoipa::path(
    delete,
    path = "/bloggers/{id}",
    params(("id" = Uuid, Path, description = "Blogger ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Unknown blogger", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn delete_blogger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.bloggers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/bloggers/{id}/posts",
    params(("id" = Uuid, Path, description = "Blogger ID")),
    responses(
        (status = 200, description = "Posts of the blogger", body = [PostView]),
        (status = 400, description = "Unknown blogger", body = ErrorsBody)
    )
)]
pub async fn get_blogger_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.posts.list_by_blogger(id).await?))
}

/// create_blogger_post
///
/// [Admin Route] Same flow as `POST /posts` with the blogger taken from the path.
#[utoipa::path(
    post,
    path = "/bloggers/{id}/posts",
    params(("id" = Uuid, Path, description = "Blogger ID")),
    request_body = BloggerPostInput,
    responses(
        (status = 201, description = "Created", body = PostView),
        (status = 400, description = "Invalid input or unknown blogger", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn create_blogger_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<BloggerPostInput>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let post = state.posts.create(payload.with_blogger(id)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

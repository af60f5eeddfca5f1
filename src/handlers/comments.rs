use crate::{
    AppState,
    auth::AuthUser,
    error::{ApiError, ErrorsBody},
    extract::ValidatedJson,
    models::{CommentInput, CommentView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Found", body = CommentView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommentView>, ApiError> {
    Ok(Json(state.comments.get(id).await?))
}

/// update_comment
///
/// [Authenticated Route] Edits the content of the caller's own comment.
#[utoipa::path(
    put,
    path = "/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = CommentInput,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid content or unknown comment", body = ErrorsBody),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the author")
    )
)]
pub async fn update_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CommentInput>,
) -> Result<StatusCode, ApiError> {
    state.comments.update(id, payload.content, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// delete_comment
///
/// [Authenticated Route] Removes the caller's own comment.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Unknown comment", body = ErrorsBody),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the author")
    )
)]
pub async fn delete_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.comments.delete(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

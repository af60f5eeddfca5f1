use crate::{
    AppState,
    auth::AuthUser,
    error::{ApiError, ErrorsBody},
    extract::ValidatedJson,
    models::{LoginInput, LoginSuccess, MeView, UserInput, UserView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [UserView]))
)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

/// create_user
///
/// [Admin Route] Registers an account. Login and e-mail must be unused.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserInput,
    responses(
        (status = 201, description = "Created", body = UserView),
        (status = 400, description = "Invalid input or login/email taken", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserInput>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Unknown user", body = ErrorsBody),
        (status = 401, description = "Missing admin credentials")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// login
///
/// [Public Route] Exchanges login and password for a Bearer access token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Token issued", body = LoginSuccess),
        (status = 400, description = "Invalid input", body = ErrorsBody),
        (status = 401, description = "Wrong login or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginInput>,
) -> Result<Json<LoginSuccess>, ApiError> {
    Ok(Json(state.users.login(payload).await?))
}

/// get_me
///
/// [Authenticated Route] The account behind the presented token.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeView),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeView>, ApiError> {
    Ok(Json(state.users.me(id).await?))
}

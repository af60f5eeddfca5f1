use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Routes that act on behalf of a user. The router is wrapped by `bearer_middleware`, and the
/// handlers take `AuthUser` themselves to learn who the caller is.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /auth/me
        .route("/auth/me", get(handlers::get_me))
        // POST /posts/{id}/comments
        // `userId`/`userLogin` of the new comment come from the token, not the body.
        .route("/posts/{id}/comments", post(handlers::create_post_comment))
        // PUT/DELETE /comments/{id}
        // Only the author may edit or remove a comment (403 otherwise).
        .route(
            "/comments/{id}",
            put(handlers::update_comment).delete(handlers::delete_comment),
        )
}

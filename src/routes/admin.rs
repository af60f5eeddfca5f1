use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{post, put},
};

/// Admin Router Module
///
/// Mutations reserved for the operator. The whole router is wrapped by `admin_middleware`
/// (see `create_router`), which rejects any request without the configured Basic credentials
/// with 401 before a handler runs.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Bloggers ---
        .route("/bloggers", post(handlers::create_blogger))
        .route(
            "/bloggers/{id}",
            put(handlers::update_blogger).delete(handlers::delete_blogger),
        )
        // POST /bloggers/{id}/posts
        // Writes a post for the blogger named in the path.
        .route("/bloggers/{id}/posts", post(handlers::create_blogger_post))
        // --- Posts ---
        // POST /posts
        // The blogger named by `bloggerId` must exist; its name is copied into the post.
        .route("/posts", post(handlers::create_post))
        .route(
            "/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        // --- Users ---
        .route("/users", post(handlers::create_user))
        .route("/users/{id}", axum::routing::delete(handlers::delete_user))
}

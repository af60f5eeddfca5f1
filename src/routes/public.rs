use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without credentials: every read, plus the login that issues tokens.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /auth/login
        // Exchanges login/password for a Bearer token.
        .route("/auth/login", post(handlers::login))
        // --- Bloggers ---
        .route("/bloggers", get(handlers::get_bloggers))
        .route("/bloggers/{id}", get(handlers::get_blogger))
        .route("/bloggers/{id}/posts", get(handlers::get_blogger_posts))
        // --- Posts ---
        .route("/posts", get(handlers::get_posts))
        .route("/posts/{id}", get(handlers::get_post))
        // GET /posts/{id}/comments
        // 400 with a structured error when the post does not exist.
        .route("/posts/{id}/comments", get(handlers::get_post_comments))
        // --- Comments & Users ---
        .route("/comments/{id}", get(handlers::get_comment))
        .route("/users", get(handlers::get_users))
}

use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;

// Routers grouped by guard (public, admin, authenticated).
pub mod routes;
use auth::{AdminGuard, AuthUser};
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use repository::Repositories;
pub use services::{BloggersService, CommentsService, PostsService, TokenSettings, UsersService};

/// ApiDoc
///
/// OpenAPI document for every handler and DTO, served at `/api-docs/openapi.json` with a
/// Swagger UI at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_bloggers, handlers::get_blogger, handlers::create_blogger,
        handlers::update_blogger, handlers::delete_blogger, handlers::get_blogger_posts,
        handlers::create_blogger_post,
        handlers::get_posts, handlers::get_post, handlers::create_post, handlers::update_post,
        handlers::delete_post, handlers::get_post_comments, handlers::create_post_comment,
        handlers::get_comment, handlers::update_comment, handlers::delete_comment,
        handlers::get_users, handlers::create_user, handlers::delete_user,
        handlers::login, handlers::get_me
    ),
    components(
        schemas(
            models::BloggerInput, models::BloggerView, models::PostInput, models::BloggerPostInput,
            models::PostView, models::CommentInput, models::CommentView, models::UserInput,
            models::UserView, models::LoginInput, models::LoginSuccess, models::MeView,
            error::ErrorsBody, error::FieldError,
        )
    ),
    tags(
        (name = "blog-backend", description = "Bloggers, posts and comments API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single state container shared by every request: one service per entity plus the
/// immutable configuration. Cloning is cheap (services only hold `Arc`s).
#[derive(Clone)]
pub struct AppState {
    pub bloggers: BloggersService,
    pub posts: PostsService,
    pub comments: CommentsService,
    pub users: UsersService,
    pub config: AppConfig,
}

impl AppState {
    /// Wires the services on top of a set of repositories.
    pub fn new(repos: Repositories, config: AppConfig) -> Self {
        let tokens = TokenSettings {
            secret: config.jwt_secret.clone(),
            ttl_secs: config.jwt_ttl_secs,
        };
        Self {
            bloggers: BloggersService::new(repos.bloggers.clone()),
            posts: PostsService::new(repos.posts.clone(), repos.bloggers.clone()),
            comments: CommentsService::new(repos.comments.clone(), repos.posts.clone()),
            users: UsersService::new(repos.users.clone(), tokens),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// The guards only need these two pieces of the state.

impl FromRef<AppState> for UsersService {
    fn from_ref(app_state: &AppState) -> UsersService {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// admin_middleware
///
/// Runs the `AdminGuard` extractor in front of the admin routes. A request without valid Basic
/// credentials is rejected with 401 and never reaches the handler.
async fn admin_middleware(_guard: AdminGuard, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// bearer_middleware
///
/// Same for the authenticated routes, using the `AuthUser` extractor (Bearer JWT). The resolved
/// user is stored in the request extensions, where the handlers' own `AuthUser` picks it up.
async fn bearer_middleware(auth_user: AuthUser, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(auth_user);
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies the guards to their route groups and the
/// observability layers to everything.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_middleware,
            )),
        )
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                bearer_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Every request gets a UUID `x-request-id` ...
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // ... which is recorded on its tracing span ...
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // ... and echoed back on the response.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: method, uri and the request id, so every log line of one
/// request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use blog_backend::{AppConfig, AppState, Repositories, auth::basic_auth_header, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

/// TestApp
///
/// The full router (guards and layers included) over a fresh in-memory store. Requests go
/// through `oneshot`, no socket involved.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(Repositories::in_memory(), AppConfig::default());
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    /// Sends one request and returns the status with the decoded body (`Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Sends a hand-built request, for cases that need headers beyond `Authorization`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let auth = admin_auth();
        self.request(method, uri, Some(&auth), body).await
    }

    pub async fn create_blogger(&self, name: &str) -> Value {
        let (status, body) = self
            .admin(
                Method::POST,
                "/bloggers",
                Some(json!({ "name": name, "youtubeUrl": "https://youtube.com/c/channel" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "blogger seed failed: {body}");
        body
    }

    pub async fn create_post(&self, blogger_id: &str, title: &str) -> Value {
        let (status, body) = self
            .admin(Method::POST, "/posts", Some(post_body(blogger_id, title)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "post seed failed: {body}");
        body
    }

    /// Registers a user through the admin route and logs in. Returns the user and a
    /// ready-to-send `Authorization` value.
    pub async fn login_as(&self, login: &str) -> (Value, String) {
        let (status, user) = self
            .admin(
                Method::POST,
                "/users",
                Some(json!({
                    "login": login,
                    "password": "secret1",
                    "email": format!("{login}@example.com"),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "user seed failed: {user}");

        let (status, body) = self
            .request(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "login": login, "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["accessToken"].as_str().unwrap().to_string();
        (user, format!("Bearer {token}"))
    }
}

pub fn admin_auth() -> String {
    basic_auth_header("admin", "qwerty")
}

pub fn post_body(blogger_id: &str, title: &str) -> Value {
    json!({
        "title": title,
        "shortDescription": "about",
        "content": "some content",
        "bloggerId": blogger_id,
    })
}

/// The `field` of every entry of an `ErrorsBody`.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errorsMessages"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

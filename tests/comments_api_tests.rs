mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::{TestApp, error_fields};
use serde_json::{Value, json};
use uuid::Uuid;

async fn seed_post(app: &TestApp) -> Value {
    let blogger = app.create_blogger("Dimych").await;
    app.create_post(blogger["id"].as_str().unwrap(), "Post").await
}

#[tokio::test]
async fn test_comment_round_trip_through_post() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let post_id = post["id"].as_str().unwrap();
    let (user, bearer) = app.login_as("alice").await;

    let (status, comment) = app
        .request(
            Method::POST,
            &format!("/posts/{post_id}/comments"),
            Some(&bearer),
            Some(json!({ "content": "hi" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment["content"], "hi");
    assert_eq!(comment["postId"], post["id"]);
    assert_eq!(comment["userId"], user["id"]);
    assert_eq!(comment["userLogin"], "alice");

    let (status, comments) = app.get(&format!("/posts/{post_id}/comments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([comment.clone()]));

    let (status, fetched) = app
        .get(&format!("/comments/{}", comment["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, comment);
}

#[tokio::test]
async fn test_comments_listed_in_insertion_order() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let uri = format!("/posts/{}/comments", post["id"].as_str().unwrap());
    let (_, bearer) = app.login_as("alice").await;

    for content in ["first", "second", "third"] {
        let (status, _) = app
            .request(Method::POST, &uri, Some(&bearer), Some(json!({ "content": content })))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, comments) = app.get(&uri).await;
    let contents: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_comments_of_missing_post() {
    let app = TestApp::new();
    let uri = format!("/posts/{}/comments", Uuid::new_v4());
    let (_, bearer) = app.login_as("alice").await;

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["postId"]);

    let (status, body) = app
        .request(Method::POST, &uri, Some(&bearer), Some(json!({ "content": "hi" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["postId"]);
}

#[tokio::test]
async fn test_create_comment_requires_token() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let uri = format!("/posts/{}/comments", post["id"].as_str().unwrap());

    let (status, _) = app
        .request(Method::POST, &uri, None, Some(json!({ "content": "hi" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin credentials are not a user identity
    let admin = common::admin_auth();
    let (status, _) = app
        .request(Method::POST, &uri, Some(&admin), Some(json!({ "content": "hi" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, comments) = app.get(&uri).await;
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn test_user_id_header_does_not_authenticate_by_default() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let uri = format!("/posts/{}/comments", post["id"].as_str().unwrap());
    let (user, _) = app.login_as("alice").await;

    // Anyone can read a user id from GET /users; it must not stand in for a token
    let forged = Request::builder()
        .method(Method::POST)
        .uri(&uri)
        .header("x-user-id", user["id"].as_str().unwrap())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "content": "forged" }).to_string()))
        .unwrap();
    let (status, _) = app.send(forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, comments) = app.get(&uri).await;
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn test_create_comment_content_bounds() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let uri = format!("/posts/{}/comments", post["id"].as_str().unwrap());
    let (_, bearer) = app.login_as("alice").await;

    for content in [String::new(), "x".repeat(301)] {
        let (status, body) = app
            .request(Method::POST, &uri, Some(&bearer), Some(json!({ "content": content })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_fields(&body), vec!["content"]);
    }
}

#[tokio::test]
async fn test_only_author_may_edit_or_delete() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let (_, alice) = app.login_as("alice").await;
    let (_, bob) = app.login_as("bob").await;

    let (_, comment) = app
        .request(
            Method::POST,
            &format!("/posts/{}/comments", post["id"].as_str().unwrap()),
            Some(&alice),
            Some(json!({ "content": "mine" })),
        )
        .await;
    let uri = format!("/comments/{}", comment["id"].as_str().unwrap());

    let (status, _) = app
        .request(Method::PUT, &uri, Some(&bob), Some(json!({ "content": "hijacked" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::PUT, &uri, Some(&alice), Some(json!({ "content": "edited" })))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched["content"], "edited");

    let (status, _) = app.request(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_comment_target() {
    let app = TestApp::new();
    let (_, bearer) = app.login_as("alice").await;
    let uri = format!("/comments/{}", Uuid::new_v4());

    let (status, body) = app.request(Method::DELETE, &uri, Some(&bearer), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["id"]);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_post_keeps_comments() {
    let app = TestApp::new();
    let post = seed_post(&app).await;
    let post_id = post["id"].as_str().unwrap();
    let (_, bearer) = app.login_as("alice").await;

    let (_, comment) = app
        .request(
            Method::POST,
            &format!("/posts/{post_id}/comments"),
            Some(&bearer),
            Some(json!({ "content": "outlives" })),
        )
        .await;

    let (status, _) = app
        .admin(Method::DELETE, &format!("/posts/{post_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) = app
        .get(&format!("/comments/{}", comment["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["postId"], post["id"]);
}

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, error_fields, post_body};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_post_copies_blogger_name() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let blogger_id = blogger["id"].as_str().unwrap();

    let post = app.create_post(blogger_id, "First").await;

    assert_eq!(post["title"], "First");
    assert_eq!(post["bloggerId"], blogger_id);
    assert_eq!(post["bloggerName"], "Dimych");

    let (status, fetched) = app.get(&format!("/posts/{}", post["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, post);
}

#[tokio::test]
async fn test_create_post_unknown_blogger_persists_nothing() {
    let app = TestApp::new();

    for blogger_id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let (status, body) = app
            .admin(Method::POST, "/posts", Some(post_body(&blogger_id, "Orphan")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_fields(&body), vec!["bloggerId"]);
    }

    let (_, posts) = app.get("/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn test_create_post_validation_errors() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;

    let (status, body) = app
        .admin(
            Method::POST,
            "/posts",
            Some(json!({
                "title": "x".repeat(31),
                "shortDescription": "",
                "content": "",
                "bloggerId": blogger["id"],
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["content", "title"]);
}

#[tokio::test]
async fn test_post_mutations_require_admin() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let body = post_body(blogger["id"].as_str().unwrap(), "Nope");

    let (status, _) = app
        .request(Method::POST, "/posts", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = blog_backend::auth::basic_auth_header("admin", "nope");
    let (status, _) = app
        .request(Method::POST, "/posts", Some(&wrong), Some(body))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, posts) = app.get("/posts").await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn test_update_post_refreshes_fields() {
    let app = TestApp::new();
    let first = app.create_blogger("First").await;
    let second = app.create_blogger("Second").await;
    let post = app.create_post(first["id"].as_str().unwrap(), "Old").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = app
        .admin(
            Method::PUT,
            &uri,
            Some(post_body(second["id"].as_str().unwrap(), "New")),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched["title"], "New");
    assert_eq!(fetched["bloggerId"], second["id"]);
    assert_eq!(fetched["bloggerName"], "Second");
    assert_eq!(fetched["createdAt"], post["createdAt"]);
}

#[tokio::test]
async fn test_update_post_unknown_blogger_leaves_post_unchanged() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let post = app.create_post(blogger["id"].as_str().unwrap(), "Keep").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = app
        .admin(
            Method::PUT,
            &uri,
            Some(post_body(&Uuid::new_v4().to_string(), "Changed")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["bloggerId"]);

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched, post);
}

#[tokio::test]
async fn test_update_missing_post_is_bad_request() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;

    let (status, body) = app
        .admin(
            Method::PUT,
            &format!("/posts/{}", Uuid::new_v4()),
            Some(post_body(blogger["id"].as_str().unwrap(), "Ghost")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["id"]);
}

#[tokio::test]
async fn test_delete_post_is_idempotent_client_error() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let keep = app.create_post(blogger["id"].as_str().unwrap(), "Keep").await;
    let gone = app.create_post(blogger["id"].as_str().unwrap(), "Gone").await;
    let uri = format!("/posts/{}", gone["id"].as_str().unwrap());

    let (status, _) = app.admin(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (first_status, first_body) = app.admin(Method::DELETE, &uri, None).await;
    let (second_status, second_body) = app.admin(Method::DELETE, &uri, None).await;
    assert_eq!(first_status, StatusCode::BAD_REQUEST);
    assert_eq!(second_status, StatusCode::BAD_REQUEST);
    assert_eq!(first_body, second_body);

    let (_, posts) = app.get("/posts").await;
    assert_eq!(posts, json!([keep]));
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.get(&format!("/posts/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_blogger_keeps_posts_with_stale_name() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let blogger_uri = format!("/bloggers/{}", blogger["id"].as_str().unwrap());
    let post = app.create_post(blogger["id"].as_str().unwrap(), "Survivor").await;

    let (status, _) = app.admin(Method::DELETE, &blogger_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) = app
        .get(&format!("/posts/{}", post["id"].as_str().unwrap()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["bloggerName"], "Dimych");
    assert_eq!(fetched["bloggerId"], blogger["id"]);

    let (status, _) = app.get(&blogger_uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_posts_in_insertion_order() {
    let app = TestApp::new();
    let blogger = app.create_blogger("Dimych").await;
    let id = blogger["id"].as_str().unwrap();
    for title in ["one", "two", "three"] {
        app.create_post(id, title).await;
    }

    let (status, posts) = app.get("/posts").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_malformed_json_is_structured_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .admin(Method::POST, "/posts", Some(json!({ "title": 5 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_missing_fields_are_named() {
    let app = TestApp::new();
    let (status, body) = app.admin(Method::POST, "/posts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut fields = error_fields(&body);
    fields.dedup();
    assert_eq!(fields, vec!["bloggerId", "content", "title"]);

    let (_, posts) = app.get("/posts").await;
    assert_eq!(posts, json!([]));
}

//! Handler tests for the Users domain
//!
//! These drive `handlers::router` over the in-memory repository:
//! - Request decoding, normalization and validation
//! - Status codes and the `Location` / `Entity` headers
//! - The flat `{ "error": "..." }` body

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_user_lifecycle_scenario() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/users",
            json!({"email": "a@b.com", "password": "secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created: UserResponse = json_body(response.into_body()).await;
    assert_eq!(location, format!("/v1/users/{}", created.id));
    assert_eq!(created.email, "a@b.com");
    assert_eq!(created.created_at, created.updated_at);
    test_utils::assertions::assert_argon2_hash(&created.password, "secret");

    // Fetch
    let response = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: UserResponse = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    // Wrong password
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{location}/email"),
            json!({"email": "c@d.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "cannot update: a@b.com");

    // Right password
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("{location}/email"),
            json!({"email": "c@d.com", "password": "secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.email, "c@d.com");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()["entity"], created.id.to_string().as_str());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    // Gone
    let response = app.oneshot(empty_request("GET", &location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], format!("user not found: {}", created.id));
}

#[tokio::test]
async fn test_update_password_requires_current_password() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_update_password");
    let original = builder.password();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/users",
            json!({"email": builder.email("pw"), "password": original}),
        ))
        .await
        .unwrap();
    let created: UserResponse = json_body(response.into_body()).await;
    let uri = format!("/v1/users/{}/password", created.id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"current_password": "not-it", "new_password": "fresh-one"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/users/{}", created.id)))
        .await
        .unwrap();
    let unchanged: UserResponse = json_body(response.into_body()).await;
    assert_eq!(unchanged, created);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"current_password": original, "new_password": "fresh-one"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = json_body(response.into_body()).await;
    assert_ne!(updated.password, created.password);
    test_utils::assertions::assert_argon2_hash(&updated.password, "fresh-one");
}

#[tokio::test]
async fn test_create_normalizes_email_and_password() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/users",
            json!({"email": "  Mixed@Case.COM ", "password": "  secret  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: UserResponse = json_body(response.into_body()).await;
    assert_eq!(created.email, "mixed@case.com");

    // The trimmed password is what got hashed
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/v1/users/{}/email", created.id),
            json!({"email": "x@y.com", "password": "secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let cases = [
        json!({"email": "not-an-email", "password": "secret"}),
        json!({"email": "a@b.com", "password": "ab"}),
        json!({"email": "a@b.com", "password": "x".repeat(101)}),
        json!({"email": "a@b.com"}),
        json!({"password": "secret"}),
    ];

    for case in cases {
        let response = app()
            .oneshot(json_request("POST", "/v1/users", case.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case {case}");

        let body: Value = json_body(response.into_body()).await;
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_users_empty_returns_empty_array() {
    let response = app()
        .oneshot(empty_request("GET", "/v1/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_users_returns_created_users() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_list");

    for suffix in ["one", "two"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/users",
                json!({"email": builder.email(suffix), "password": builder.password()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(empty_request("GET", "/v1/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, builder.email("one"));
    assert_eq!(users[1].email, builder.email("two"));
}

#[tokio::test]
async fn test_delete_missing_user_is_bad_request() {
    let id = TestDataBuilder::from_test_name("handler_delete_missing").user_id();

    let response = app()
        .oneshot(empty_request("DELETE", &format!("/v1/users/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], format!("user not found: {id}"));
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let response = app()
        .oneshot(empty_request("GET", "/v1/users/12345"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "invalid id: 12345");
}

//! Handler tests for the Users domain
//!
//! These tests drive the domain routers with `oneshot` against the in-memory
//! repository:
//! - Request deserialization and field validation
//! - Response envelope and status codes
//! - Error body shape
//!
//! Authentication is layered by the application and tested there.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig, StaticCredentials};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::assertions::assert_argon2id_hash;
use tower::ServiceExt; // For oneshot()

fn hasher() -> Argon2IdHasher {
    Argon2IdHasher::new(&HashConfig {
        time_cost: 1,
        memory_cost: 1024,
        lanes: 1,
        hash_length: 32,
        salt: "handler-test-salt".to_string(),
    })
    .unwrap()
}

fn users_app() -> Router {
    let service = UserService::new(InMemoryUserRepository::new(), hasher());
    handlers::router(service)
}

fn jwt_config() -> JwtConfig {
    JwtConfig::new("admin", "admin-password", "k".repeat(32), 8).unwrap()
}

fn auth_app() -> Router {
    let config = jwt_config();
    auth_handlers::router(
        Arc::new(StaticCredentials::from_config(&config)),
        JwtAuth::new(&config),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_alice(app: &Router) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/create",
        Some(json!({
            "name": "Alice Example",
            "email": "alice@example.com",
            "password": "secret1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn test_create_user_returns_envelope_with_hash() {
    let app = users_app();
    let body = create_alice(&app).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully");

    let user: UserDto = serde_json::from_value(body["data"].clone()).unwrap();
    assert!(user.id >= 1);
    assert_eq!(user.email, "alice@example.com");
    assert_argon2id_hash(&user.password, "secret1");
}

#[tokio::test]
async fn test_create_user_rejects_invalid_fields() {
    let app = users_app();
    let (status, body) = send(
        &app,
        "POST",
        "/create",
        Some(json!({ "name": "Al", "email": "not-an-email", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_create_user_duplicate_email_any_case() {
    let app = users_app();
    create_alice(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/create",
        Some(json!({
            "name": "Alice Twin",
            "email": "ALICE@example.com",
            "password": "secret2"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DUPLICATE_EMAIL");

    let (_, all) = send(&app, "GET", "/get-all", None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = users_app();
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_found_and_missing() {
    let app = users_app();
    let created = create_alice(&app).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/get/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice Example");

    let (status, body) = send(&app, "GET", "/get/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_user_with_non_positive_id_is_not_found() {
    let app = users_app();
    create_alice(&app).await;

    for uri in ["/get/0", "/get/-5"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_get_user_rejects_non_numeric_id() {
    let app = users_app();
    let (status, _) = send(&app, "GET", "/get/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_all_empty_is_not_found() {
    let app = users_app();
    let (status, _) = send(&app, "GET", "/get-all", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_overwrites_fields() {
    let app = users_app();
    let created = create_alice(&app).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let old_hash = created["data"]["password"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        "/update",
        Some(json!({
            "id": id,
            "name": "Alice Renamed",
            "email": "alice.renamed@example.com",
            "password": "another1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "Alice Renamed");
    assert_eq!(body["data"]["email"], "alice.renamed@example.com");
    assert_ne!(body["data"]["password"], old_hash);
}

#[tokio::test]
async fn test_update_unknown_user_is_bad_request() {
    let app = users_app();
    let (status, body) = send(
        &app,
        "PUT",
        "/update",
        Some(json!({
            "id": 77,
            "name": "Nobody Here",
            "email": "nobody@example.com",
            "password": "secret1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let app = users_app();
    let created = create_alice(&app).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/remove/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());

    let (status, _) = send(&app, "DELETE", &format!("/remove/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/get/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_endpoints() {
    let app = users_app();
    create_alice(&app).await;
    send(
        &app,
        "POST",
        "/create",
        Some(json!({ "name": "Bob Stone", "email": "bob@company.org", "password": "secret1" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/search-by-email?email=EXAMPLE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["email"], "alice@example.com");

    let (status, body) = send(&app, "GET", "/search-by-name?name=stone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Bob Stone");

    let (status, _) = send(&app, "GET", "/search-by-name?name=zzz", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/search-by-email", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_issues_token_with_expiry() {
    let app = auth_app();
    let before = chrono::Utc::now();

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "login": "admin", "password": "admin-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);

    let data: LoginResponse = serde_json::from_value(body["data"].clone()).unwrap();
    assert!(!data.token.is_empty());

    let expected = before + chrono::Duration::hours(8);
    let drift = (data.token_expires - expected).num_seconds().abs();
    assert!(drift <= 5, "expiry drifted by {drift}s");

    let claims = JwtAuth::new(&jwt_config()).verify(&data.token).unwrap();
    assert_eq!(claims.exp, data.token_expires.timestamp());
}

#[tokio::test]
async fn test_login_rejects_any_mismatch() {
    let app = auth_app();

    for (login, password) in [
        ("admin", "wrong"),
        ("Admin", "admin-password"),
        ("someone", "admin-password"),
    ] {
        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({ "login": login, "password": password })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid login or password");
        assert!(body.get("token").is_none());
    }
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = auth_app();
    let (status, _) = send(&app, "POST", "/login", Some(json!({ "login": "", "password": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

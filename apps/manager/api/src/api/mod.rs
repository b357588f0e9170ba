use axum::Router;
use axum_helpers::{CredentialVerifier, JwtAuth};
use domain_users::{PgUserRepository, UserRepository, UserService, auth_handlers};
use std::sync::Arc;

pub mod health;
pub mod users;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `create_router`.
pub fn routes(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository, state.hasher.clone());

    v1(service, state.credentials.clone(), state.jwt_auth.clone())
}

/// `/v1/auth/login` (open) and `/v1/users/*` (bearer token required).
pub fn v1<R: UserRepository + 'static>(
    service: UserService<R>,
    credentials: Arc<dyn CredentialVerifier>,
    jwt_auth: JwtAuth,
) -> Router {
    let v1 = Router::new()
        .nest("/auth", auth_handlers::router(credentials, jwt_auth.clone()))
        .nest("/users", users::router(service, jwt_auth));

    Router::new().nest("/v1", v1)
}

/// Router with the `/ready` endpoint, merged next to `/health`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::AUTHORIZATION};
    use axum_helpers::{JwtConfig, StaticCredentials};
    use domain_users::{Argon2IdHasher, HashConfig, InMemoryUserRepository};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let jwt = JwtConfig::new("admin", "admin-password", "s".repeat(32), 8).unwrap();
        let hasher = Argon2IdHasher::new(&HashConfig {
            time_cost: 1,
            memory_cost: 1024,
            lanes: 1,
            hash_length: 32,
            salt: "app-test-salt".to_string(),
        })
        .unwrap();

        let service = UserService::new(InMemoryUserRepository::new(), hasher);
        Router::new().nest(
            "/api",
            v1(
                service,
                Arc::new(StaticCredentials::from_config(&jwt)),
                JwtAuth::new(&jwt),
            ),
        )
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router) -> String {
        let (status, body) = call(
            app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "login": "admin", "password": "admin-password" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_users_require_bearer_token() {
        let app = app();
        let request = Request::builder()
            .uri("/api/v1/users/get-all")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_forged_token_is_rejected() {
        let app = app();
        let request = Request::builder()
            .uri("/api/v1/users/get-all")
            .header(AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();

        let (status, _) = call(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_then_create_alice() {
        let app = app();
        let token = login(&app).await;

        let (status, body) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/users/create",
                Some(&token),
                json!({
                    "name": "Alice Example",
                    "email": "alice@example.com",
                    "password": "secret1"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(body["data"]["id"].as_i64().unwrap() >= 1);
        assert_eq!(body["data"]["email"], "alice@example.com");
        assert_ne!(body["data"]["password"], "secret1");

        let request = Request::builder()
            .uri("/api/v1/users/search-by-name?name=alice")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Alice Example");
    }

    #[tokio::test]
    async fn test_login_is_not_protected() {
        let app = app();
        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "login": "admin", "password": "nope" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

use super::jwt::{JwtAuth, TokenError};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| {
            let (scheme, token) = auth.split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty())
}

/// Reject requests without a valid bearer token.
///
/// On success the decoded [`super::JwtClaims`] are inserted into the request
/// extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/users/get-all", get(get_all))
///     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(&headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    let claims = auth.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        match e {
            TokenError::Expired => AppError::Unauthorized("Token has expired".to_string()),
            _ => AppError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtClaims, JwtConfig};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(
            &JwtConfig::new("admin", "password", "middleware-test-key-long-enough-1234", 1)
                .unwrap(),
        )
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/protected",
                get(|Extension(claims): Extension<JwtClaims>| async move { claims.jti }),
            )
            .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    async fn call(app: Router, authorization: Option<String>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert_eq!(call(app(auth()), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let token = auth().issue().unwrap().token;
        let status = call(app(auth()), Some(format!("Basic {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tampered_token_is_unauthorized() {
        let token = auth().issue().unwrap().token;
        let status = call(app(auth()), Some(format!("Bearer {token}x"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let auth = auth();
        let token = auth.issue().unwrap().token;
        let status = call(app(auth), Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}

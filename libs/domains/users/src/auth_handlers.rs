use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    CredentialVerifier, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{ApiResponse, LoginRequest, LoginResponse};

/// OpenAPI documentation for the login endpoint
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(schemas(LoginRequest, LoginResponse)),
    tags((name = "auth", description = "Token issuance"))
)]
pub struct AuthApiDoc;

/// Shared state for the login handler
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub jwt: JwtAuth,
}

/// Create the auth router (`/login`), unauthenticated.
pub fn router(verifier: Arc<dyn CredentialVerifier>, jwt: JwtAuth) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(AuthState { verifier, jwt })
}

/// Exchange the configured login pair for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = ApiResponse<LoginResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login(
    State(state): State<AuthState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<ApiResponse<LoginResponse>>> {
    if !state.verifier.verify(&input.login, &input.password) {
        tracing::warn!(login = %input.login, "Rejected login attempt");
        return Err(UserError::InvalidCredentials);
    }

    let issued = state
        .jwt
        .issue()
        .map_err(|e| UserError::Token(e.to_string()))?;

    tracing::info!(expires_at = %issued.expires_at, "Issued access token");

    Ok(Json(ApiResponse::ok(
        "User authenticated successfully",
        LoginResponse {
            token: issued.token,
            token_expires: issued.expires_at,
        },
    )))
}

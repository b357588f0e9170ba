use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, ErrorResponse, error_response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::Validation(messages) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), ?messages, "User validation failed");
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        ErrorCode::ValidationError,
                        ErrorCode::ValidationError.default_message(),
                    )
                    .with_details(json!(messages)),
                )
            }
            UserError::DuplicateEmail(email) => {
                tracing::info!(%email, "Duplicate email rejected");
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        ErrorCode::DuplicateEmail,
                        ErrorCode::DuplicateEmail.default_message(),
                    ),
                )
            }
            UserError::UserNotFound(id) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::UserNotFound, format!("User {id} not found")),
            ),
            UserError::NotFound(message) => error_response(
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, message),
            ),
            UserError::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(
                    ErrorCode::InvalidCredentials,
                    ErrorCode::InvalidCredentials.default_message(),
                ),
            ),
            UserError::PasswordHash(msg) => internal(ErrorCode::PasswordHashError, &msg),
            UserError::Token(msg) => internal(ErrorCode::TokenError, &msg),
            UserError::Internal(msg) => internal(ErrorCode::InternalError, &msg),
        }
    }
}

fn internal(code: ErrorCode, detail: &str) -> Response {
    tracing::error!(error_code = code.code(), "{}", detail);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(code, code.default_message()),
    )
}

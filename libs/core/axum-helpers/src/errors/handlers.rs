use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, ErrorResponse, error_response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found"),
    )
}

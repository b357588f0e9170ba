//! Type-safe error codes for API responses.
//!
//! Every error body carries both forms of a code:
//! - a SCREAMING_SNAKE_CASE identifier for clients (e.g. `"DUPLICATE_EMAIL"`)
//! - an integer for logs and dashboards (e.g. `1008`)
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more field rules failed
    ValidationError,
    /// Request body is not the expected JSON
    InvalidJson,
    /// Path or query parameter could not be parsed
    InvalidParameter,
    /// Requested resource was not found
    NotFound,
    /// Bearer token missing, malformed, expired or wrongly signed
    Unauthorized,
    /// Login and password did not match
    InvalidCredentials,
    /// Another user already owns the email address
    DuplicateEmail,
    /// Update targeted a user id that does not exist
    UserNotFound,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,
    /// A dependency (database) is not reachable
    ServiceUnavailable,

    // Infrastructure errors (2000-2999)
    PasswordHashError,
    TokenError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::PasswordHashError => "PASSWORD_HASH_ERROR",
            Self::TokenError => "TOKEN_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: infrastructure errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::InvalidParameter => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::InvalidCredentials => 1007,
            Self::DuplicateEmail => 1008,
            Self::UserNotFound => 1009,
            Self::ServiceUnavailable => 1011,
            Self::PasswordHashError => 2001,
            Self::TokenError => 2002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidJson => "Failed to parse request body",
            Self::InvalidParameter => "Invalid request parameter",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::InvalidCredentials => "Invalid login or password",
            Self::DuplicateEmail => "A user with this email already exists",
            Self::UserNotFound => "User not found",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::PasswordHashError => "An internal server error occurred",
            Self::TokenError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

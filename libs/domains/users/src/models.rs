use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::EMAIL_REGEX;

/// User as exchanged with the service layer.
///
/// `password` carries the stored Argon2id hash on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /v1/users/create`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 3, max = 80, message = "Name must be between 3 and 80 characters"))]
    #[schema(example = "Alice Example")]
    pub name: String,

    #[validate(
        length(min = 10, max = 180, message = "Email must be between 10 and 180 characters"),
        regex(path = *EMAIL_REGEX, message = "Email format is invalid")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Password must be between 6 and 30 characters"))]
    #[schema(example = "secret1")]
    pub password: String,
}

impl From<CreateUser> for UserDto {
    fn from(input: CreateUser) -> Self {
        Self {
            id: 0,
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }
}

/// Request body for `PUT /v1/users/update`. Every field is overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(range(min = 1, message = "Id must be at least 1"))]
    pub id: i64,

    #[validate(length(min = 3, max = 80, message = "Name must be between 3 and 80 characters"))]
    pub name: String,

    #[validate(
        length(min = 10, max = 180, message = "Email must be between 10 and 180 characters"),
        regex(path = *EMAIL_REGEX, message = "Email format is invalid")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 30, message = "Password must be between 6 and 30 characters"))]
    pub password: String,
}

impl From<UpdateUser> for UserDto {
    fn from(input: UpdateUser) -> Self {
        Self {
            id: input.id,
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }
}

/// `?email=` for `GET /v1/users/search-by-email`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct EmailSearch {
    /// Case-insensitive fragment of the email
    pub email: String,
}

/// `?name=` for `GET /v1/users/search-by-name`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct NameSearch {
    /// Case-insensitive fragment of the name
    pub name: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login must not be empty"))]
    pub login: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Issued bearer token and the instant it expires.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_expires: DateTime<Utc>,
}

/// Envelope for every successful response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload; `data` serializes as `null`.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            data: None,
        }
    }
}

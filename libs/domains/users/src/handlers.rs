use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{ApiResponse, CreateUser, EmailSearch, NameSearch, UpdateUser, UserDto};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        update_user,
        remove_user,
        get_user,
        get_all_users,
        search_by_email,
        search_by_name,
    ),
    components(
        schemas(UserDto, CreateUser, UpdateUser),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router.
///
/// Routes are relative; the caller nests them (at `/v1/users`) and applies
/// authentication.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create", post(create_user))
        .route("/update", put(update_user))
        .route("/remove/{id}", delete(remove_user))
        .route("/get/{id}", get(get_user))
        .route("/get-all", get(get_all_users))
        .route("/search-by-email", get(search_by_email))
        .route("/search-by-name", get(search_by_name))
        .with_state(shared_service)
}

fn found(users: Vec<UserDto>, empty_message: &str) -> UserResult<Json<ApiResponse<Vec<UserDto>>>> {
    if users.is_empty() {
        return Err(UserError::NotFound(empty_message.to_string()));
    }
    Ok(Json(ApiResponse::ok("Users found", users)))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/create",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Json<ApiResponse<UserDto>>> {
    let user = service.create(input.into()).await?;
    Ok(Json(ApiResponse::ok("User created successfully", user)))
}

/// Overwrite an existing user
#[utoipa::path(
    put,
    path = "/update",
    tag = TAG,
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<ApiResponse<UserDto>>> {
    let user = service.update(input.into()).await?;
    Ok(Json(ApiResponse::ok("User updated successfully", user)))
}

/// Remove a user; unknown ids succeed as well
#[utoipa::path(
    delete,
    path = "/remove/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn remove_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<ApiResponse<()>>> {
    service.remove(id).await?;
    Ok(Json(ApiResponse::empty("User removed successfully")))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/get/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserDto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<ApiResponse<UserDto>>> {
    let user = service
        .get(id)
        .await?
        .ok_or_else(|| UserError::NotFound("No user was found".to_string()))?;

    Ok(Json(ApiResponse::ok("User found", user)))
}

/// List every user
#[utoipa::path(
    get,
    path = "/get-all",
    tag = TAG,
    responses(
        (status = 200, description = "Users found", body = ApiResponse<Vec<UserDto>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_all_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<ApiResponse<Vec<UserDto>>>> {
    found(service.get_all().await?, "No users were found")
}

/// Users whose email contains the term, ignoring case
#[utoipa::path(
    get,
    path = "/search-by-email",
    tag = TAG,
    params(EmailSearch),
    responses(
        (status = 200, description = "Users found", body = ApiResponse<Vec<UserDto>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn search_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<EmailSearch>,
) -> UserResult<Json<ApiResponse<Vec<UserDto>>>> {
    found(service.search_by_email(&query.email).await?, "No user matches that email")
}

/// Users whose name contains the term, ignoring case
#[utoipa::path(
    get,
    path = "/search-by-name",
    tag = TAG,
    params(NameSearch),
    responses(
        (status = 200, description = "Users found", body = ApiResponse<Vec<UserDto>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn search_by_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NameSearch>,
) -> UserResult<Json<ApiResponse<Vec<UserDto>>>> {
    found(service.search_by_name(&query.name).await?, "No user matches that name")
}

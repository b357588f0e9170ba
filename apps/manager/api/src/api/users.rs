use axum::{Router, middleware};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_users::{UserRepository, UserService, handlers};

/// User routes behind bearer authentication.
///
/// `route_layer` keeps unknown paths on the JSON 404 fallback instead of
/// answering them with 401.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    handlers::router(service).route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
}

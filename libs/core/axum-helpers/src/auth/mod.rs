//! Bearer token authentication.
//!
//! - [`JwtAuth`] signs and verifies stateless HS256 tokens
//! - [`CredentialVerifier`] gates who may obtain a token
//! - [`jwt_auth_middleware`] protects routes
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! let protected = Router::new()
//!     .route("/users/get-all", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod credentials;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use credentials::{CredentialVerifier, StaticCredentials};
pub use jwt::{IssuedToken, JwtAuth, JwtClaims, TokenError};
pub use middleware::jwt_auth_middleware;

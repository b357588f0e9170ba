//! Shared application state.

use axum_helpers::{CredentialVerifier, JwtAuth};
use database::postgres::DatabaseConnection;
use domain_users::Argon2IdHasher;
use std::sync::Arc;

/// Cloned into routers at startup; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Token issuer/verifier
    pub jwt_auth: JwtAuth,
    /// Gate in front of token issuance
    pub credentials: Arc<dyn CredentialVerifier>,
    pub hasher: Argon2IdHasher,
}

//! Users Domain
//!
//! User registration and lookup with Argon2id password storage.
//!
//! # Features
//!
//! - User create / update / remove / lookup / search
//! - Field rules collected into a [`ValidationResult`] instead of failing fast
//! - Argon2id password hashing with a server-held salt
//! - Token login against a pluggable [`axum_helpers::CredentialVerifier`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (users + login)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Existence checks, validation, hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, request bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers, Argon2IdHasher, HashConfig, InMemoryUserRepository, UserService,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hasher = Argon2IdHasher::new(&HashConfig::new("server-side-salt"))?;
//! let service = UserService::new(InMemoryUserRepository::new(), hasher);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod hasher;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod user;
pub mod validation;

pub use error::{UserError, UserResult};
pub use hasher::{Argon2IdHasher, HashConfig};
pub use models::{
    ApiResponse, CreateUser, EmailSearch, LoginRequest, LoginResponse, NameSearch, UpdateUser,
    UserDto,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use user::User;
pub use validation::ValidationResult;

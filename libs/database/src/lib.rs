//! Database connectivity for the user manager.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL through SeaORM, migrations, health probe
//! - `config` - `core_config::FromEnv` support for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(&config).await?;
//! postgres::run_migrations::<Migrator>(&db, "manager_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};

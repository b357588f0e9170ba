use axum_helpers::server::{create_production_app, create_router, health_router};
use axum_helpers::{JwtAuth, StaticCredentials};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use domain_users::Argon2IdHasher;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are reported in color
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = connect_with_retry(&config.database)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let hasher = Argon2IdHasher::new(&config.hash)?;

    let state = AppState {
        jwt_auth: JwtAuth::new(&config.jwt),
        credentials: Arc::new(StaticCredentials::from_config(&config.jwt)),
        hasher,
        db,
        config,
    };

    let api_routes = api::routes(&state);
    let server_config = state.config.server.clone();

    // - /health: liveness with app name/version
    // - /ready: database round trip
    let app = create_router::<openapi::ApiDoc>(api_routes, &server_config)?
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(app = state.config.app.name, version = state.config.app.version, "Starting user manager API");

    create_production_app(app, &server_config, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("User manager API shutdown complete");
    Ok(())
}

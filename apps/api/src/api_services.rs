use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use storefront_application::{CatalogRepository, CatalogService};
use storefront_core::AppError;
use storefront_infrastructure::{InMemoryCatalogRepository, PostgresCatalogRepository};
use tracing::info;

use crate::api_config::{ApiConfig, StorageConfig};
use crate::state::AppState;

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let repository: Arc<dyn CatalogRepository> = match &config.storage {
        StorageConfig::Memory => {
            info!("using in-memory catalog storage");
            Arc::new(InMemoryCatalogRepository::new())
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = connect_and_migrate(database_url, *max_connections).await?;
            info!("using postgres catalog storage");
            Arc::new(PostgresCatalogRepository::new(pool))
        }
    };

    Ok(AppState::new(CatalogService::new(repository)))
}

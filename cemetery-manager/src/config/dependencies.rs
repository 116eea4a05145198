//! Dependency initialization and wiring for the cemetery manager.
use std::str::FromStr;
use std::sync::Arc;

use cemetery_repository::{
    run_migrations, BodyRepository, CemeteryRepository, GraveRepository, SqliteBodyRepository,
    SqliteCemeteryRepository, SqliteGraveRepository, SystemClock,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use super::ManagerConfig;
use crate::errors::AppError;

/// Container for the pool and the repositories built on top of it.
pub struct Dependencies {
    pub pool: SqlitePool,
    pub bodies: Arc<dyn BodyRepository>,
    pub graves: Arc<dyn GraveRepository>,
    pub cemetery: Arc<dyn CemeteryRepository>,
}

impl Dependencies {
    /// Opens the database described by `config`, applies pending migrations
    /// and builds the repositories.
    ///
    /// Connections enforce foreign keys and wait up to `config.busy_timeout`
    /// for the database write lock.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the database cannot be opened or migrated
    pub async fn new(config: &ManagerConfig) -> Result<Self, AppError> {
        info!(
            database_url = %config.database_url,
            max_connections = config.max_connections,
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            "Initializing dependencies"
        );

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;
        info!("Database migrations applied");

        Ok(Self::from_pool(pool))
    }

    /// Builds the repositories over an already migrated pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            bodies: Arc::new(SqliteBodyRepository::with_clock(
                pool.clone(),
                Arc::new(SystemClock),
            )),
            graves: Arc::new(SqliteGraveRepository::new(pool.clone())),
            cemetery: Arc::new(SqliteCemeteryRepository::new(pool.clone())),
            pool,
        }
    }
}

//! Postgres pool lifecycle.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use foodbridge_core::config::DatabaseConfig;
use foodbridge_core::error::{AppError, ErrorKind};

/// Owns the sqlx pool from startup until shutdown.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens the pool and verifies the database answers before handing
    /// it out.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %config.masked_url(),
            pool_max = config.max_connections,
            pool_min = config.min_connections,
            "Opening Postgres pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(config.idle_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Could not open the database pool", e)
            })?;

        let database = Self { pool };
        database.ping().await?;
        info!("Postgres pool ready");

        Ok(database)
    }

    /// Borrow the underlying pool, e.g. for the migration runner.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Hand the pool over to the application state.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    /// Round-trip a trivial query to confirm connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }
}

/**
 * Server Configuration
 *
 * Turns a validated `AppConfig` into live resources. Unlike request-time
 * errors, anything that fails here stops the server: a Postgres layout
 * without a reachable database or with failed migrations is not a state
 * worth serving from.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::db;
use crate::shared::{AppConfig, ConfigError};

/// Errors that abort server startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to the database and run migrations, if the layout needs one
///
/// Returns `Ok(None)` for the in-memory layout.
///
/// # Errors
///
/// - `StartupError::Config` if `DATABASE_URL` is missing for a Postgres layout
/// - `StartupError::Database` if the connection cannot be established
/// - `StartupError::Migration` if the embedded migrations fail
pub async fn load_database(config: &AppConfig) -> Result<Option<PgPool>, StartupError> {
    if !config.store.needs_database() {
        tracing::warn!(layout = %config.store, "Using in-memory storage; data is lost on restart");
        return Ok(None);
    }

    let url = config
        .database_url
        .as_deref()
        .ok_or(ConfigError::MissingValue("DATABASE_URL"))?;

    let pool = db::connect(url).await?;
    db::run_migrations(&pool).await?;
    Ok(Some(pool))
}

/**
 * Database Plumbing
 *
 * Connection pool creation, migrations, and the error type shared by every
 * store implementation (account and product stores, Postgres and in-memory).
 *
 * # Uniqueness
 *
 * Handlers pre-check uniqueness to give a clean 409, but the storage layer is
 * the source of truth: concurrent requests can both pass the pre-check, and
 * only the unique constraint stops the second write. `StoreError::Conflict`
 * is how that second write surfaces.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Which unique attribute a write collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    TaxId,
    Barcode,
}

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated on {0:?}")]
    Conflict(UniqueField),

    /// A stored row could not be mapped onto the domain model
    #[error("invalid stored row: {0}")]
    InvalidRow(String),

    /// Any other backing-store fault
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if let Some(field) = db_err.constraint().and_then(unique_field_for) {
                    return StoreError::Conflict(field);
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Map a constraint name from `migrations/` onto the attribute it guards
fn unique_field_for(constraint: &str) -> Option<UniqueField> {
    match constraint {
        "clients_email_key" | "sellers_email_key" | "users_email_key" => Some(UniqueField::Email),
        "sellers_cnpj_key" | "users_cnpj_key" => Some(UniqueField::TaxId),
        "products_seller_barcode_key" => Some(UniqueField::Barcode),
        _ => None,
    }
}

/// Connect to PostgreSQL
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Decide whether internal error details reach API callers
 * 2. Connect the database (Postgres layouts only)
 * 3. Build the account store, product store, hasher and token issuer
 * 4. Create and configure the router
 */

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use sqlx::PgPool;

use crate::backend::auth::{create_account_store, AuthService, PasswordHasher, TokenIssuer};
use crate::backend::error::expose_internal_errors;
use crate::backend::products::{MemoryProductStore, PgProductStore, Products};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, StartupError};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Any `StartupError`; the caller should treat it as fatal.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!(
        environment = ?config.environment,
        layout = %config.store,
        "Initializing Compra Pronta backend"
    );

    expose_internal_errors(config.environment.exposes_internal_errors());

    let pool = load_database(&config).await?;
    let state = build_state(config, pool)?;

    tracing::info!("Router configured");
    Ok(create_router(state))
}

/// Assemble the application state from configuration and an optional pool
///
/// Products share the account store's pool; without one they are kept in
/// memory.
pub fn build_state(config: AppConfig, pool: Option<PgPool>) -> Result<AppState, StartupError> {
    let accounts = create_account_store(config.store, pool.clone())?;

    let products: Products = match pool {
        Some(pool) => Arc::new(PgProductStore::new(pool)),
        None => Arc::new(MemoryProductStore::new()),
    };

    let tokens = TokenIssuer::new(
        config.jwt_secret_bytes(),
        config.token_lifetime,
        config.token_lifetime_label.clone(),
    );
    let passwords = PasswordHasher::new(config.bcrypt_rounds);

    Ok(AppState {
        auth: AuthService::new(accounts, passwords, tokens),
        products,
        config: Arc::new(config),
        started_at: Instant::now(),
    })
}

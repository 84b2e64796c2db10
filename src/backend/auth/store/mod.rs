//! Credential Store
//!
//! Persistence of accounts behind one object-safe trait, so the rest of the
//! auth code never knows which storage layout is in use.
//!
//! # Layouts
//!
//! ```text
//! store/
//! ├── mod.rs      - AccountStore trait and create_account_store
//! ├── rows.rs     - Row type shared by the Postgres layouts
//! ├── split.rs    - `clients` + `sellers` tables
//! ├── unified.rs  - single `users` table with `is_seller`
//! └── memory.rs   - in-process store for tests and local development
//! ```
//!
//! The layout is chosen once at startup from `ACCOUNT_STORE`.
//!
//! # Not Found vs. Faults
//!
//! A missing record is `Ok(None)`. `Err(StoreError)` always means the backing
//! store failed (or a unique constraint fired) and is propagated as such.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::accounts::{Account, AccountChanges, AccountDraft};
use crate::backend::db::StoreError;
use crate::shared::{ConfigError, Role, StoreLayout};

pub mod memory;
mod rows;
pub mod split;
pub mod unified;

pub use memory::MemoryStore;
pub use split::SplitPgStore;
pub use unified::UnifiedPgStore;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Account persistence, partitioned by role
///
/// Lookups return inactive accounts too; callers decide whether a
/// deactivated account counts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account of `role` by normalized email
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>>;

    /// Look up an account of `role` by id
    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Account>>;

    /// Look up a seller by CNPJ
    async fn find_by_tax_id(&self, cnpj: &str) -> Result<Option<Account>>;

    /// Persist a new active account, assigning id and timestamps
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if email (or CNPJ, for sellers) is already stored.
    async fn create(&self, draft: AccountDraft) -> Result<Account>;

    /// Apply a partial update and refresh `updated_at`
    ///
    /// Returns `None` if no account of `role` has that id.
    async fn update(&self, role: Role, id: Uuid, changes: AccountChanges) -> Result<Option<Account>>;

    /// Soft-delete an account
    ///
    /// Returns whether the account exists. Deactivating an already inactive
    /// account succeeds and leaves it inactive.
    async fn deactivate(&self, role: Role, id: Uuid) -> Result<bool>;

    /// Active accounts, newest first, optionally restricted to one role
    async fn list_active(&self, role: Option<Role>) -> Result<Vec<Account>>;
}

/// Create the account store for the configured layout
///
/// # Errors
///
/// Returns `ConfigError::MissingValue("DATABASE_URL")` when a Postgres layout
/// is requested without a pool.
pub fn create_account_store(
    layout: StoreLayout,
    pool: Option<PgPool>,
) -> std::result::Result<Arc<dyn AccountStore>, ConfigError> {
    let store: Arc<dyn AccountStore> = match (layout, pool) {
        (StoreLayout::Split, Some(pool)) => Arc::new(SplitPgStore::new(pool)),
        (StoreLayout::Unified, Some(pool)) => Arc::new(UnifiedPgStore::new(pool)),
        (StoreLayout::Memory, _) => Arc::new(MemoryStore::new()),
        (_, None) => return Err(ConfigError::MissingValue("DATABASE_URL")),
    };
    tracing::info!(layout = %layout, "Account store selected");
    Ok(store)
}

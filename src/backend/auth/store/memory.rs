/**
 * In-Memory Account Store
 *
 * Explicit in-process implementation of `AccountStore` for tests and local
 * development. It enforces the same uniqueness rules the unified table does:
 * email across every account, CNPJ across sellers. Configuration rejects it
 * in production.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccountStore, Result};
use crate::backend::auth::accounts::{Account, AccountChanges, AccountDraft};
use crate::backend::db::{StoreError, UniqueField};
use crate::shared::Role;

/// In-memory account store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.role() == role && a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).filter(|a| a.role() == role).cloned())
    }

    async fn find_by_tax_id(&self, cnpj: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.cnpj() == Some(cnpj)).cloned())
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == draft.email) {
            return Err(StoreError::Conflict(UniqueField::Email));
        }
        if let Some(cnpj) = draft.profile_cnpj() {
            if accounts.values().any(|a| a.cnpj() == Some(cnpj)) {
                return Err(StoreError::Conflict(UniqueField::TaxId));
            }
        }

        let account = draft.into_account(Uuid::new_v4(), Utc::now());
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, role: Role, id: Uuid, changes: AccountChanges) -> Result<Option<Account>> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id).filter(|a| a.role() == role) {
            Some(account) => {
                account.apply(changes, Utc::now());
                Ok(Some(account.clone()))
            }
            None => Ok(None),
        }
    }

    async fn deactivate(&self, role: Role, id: Uuid) -> Result<bool> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&id).filter(|a| a.role() == role) {
            Some(account) => {
                account.active = false;
                account.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active(&self, role: Option<Role>) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut active: Vec<Account> = accounts
            .values()
            .filter(|a| a.active && role.map_or(true, |r| a.role() == r))
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }
}

/**
 * Identity Resolution
 *
 * Maps an email (or a role + id taken from a token) onto an account and its
 * role, searching every role partition of the configured store. Only the
 * store trait is used, so the same logic serves every layout.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::auth::accounts::Account;
use crate::backend::auth::store::{AccountStore, Result};
use crate::shared::Role;

/// An account together with the partition it was found in
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub account: Account,
    pub role: Role,
}

/// Resolves identities across role partitions
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn AccountStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Find the active account registered under `email`
    ///
    /// Every partition is checked before returning `None`. Inactive accounts
    /// are skipped.
    pub async fn resolve_email(&self, email: &str) -> Result<Option<ResolvedIdentity>> {
        for role in Role::ALL {
            if let Some(account) = self.store.find_by_email(role, email).await? {
                if account.active {
                    return Ok(Some(ResolvedIdentity { account, role }));
                }
            }
        }
        Ok(None)
    }

    /// Whether any account, active or not, already uses `email`
    ///
    /// Registration uses this rather than `resolve_email`: a deactivated
    /// account still owns its email.
    pub async fn email_in_use(&self, email: &str) -> Result<bool> {
        for role in Role::ALL {
            if self.store.find_by_email(role, email).await?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Re-resolve the active account a token was issued for
    pub async fn resolve_id(&self, role: Role, id: Uuid) -> Result<Option<ResolvedIdentity>> {
        let account = self.store.find_by_id(role, id).await?;
        Ok(account
            .filter(|a| a.active)
            .map(|account| ResolvedIdentity { account, role }))
    }
}

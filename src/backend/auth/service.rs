/**
 * Authentication Flows
 *
 * `AuthService` composes the store, resolver, password hasher and token
 * issuer into the operations the HTTP handlers expose. Handlers only do
 * request validation and response shaping; every rule about who may log in,
 * register or see what lives here.
 *
 * # Step Order
 *
 * Each flow awaits its steps in a fixed order. Login resolves the account
 * before touching bcrypt, so no hash is computed for an email that does not
 * exist. Registration checks email, then CNPJ, then hashes, then writes.
 */

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::backend::auth::accounts::{Account, AccountChanges, AccountDraft, Profile};
use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::resolver::{IdentityResolver, ResolvedIdentity};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::store::AccountStore;
use crate::backend::error::BackendError;
use crate::shared::Role;

/// Data for a new account, already validated
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    /// Normalized email
    pub email: String,
    pub password: String,
    pub phone: String,
    pub profile: Profile,
    pub address: Value,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial profile update, already validated
#[derive(Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// New plaintext password; hashed before it reaches the store
    pub password: Option<String>,
}

/// A freshly issued token and the account it was issued for
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Account,
    pub role: Role,
    /// Configured lifetime label, e.g. `24h`
    pub expires_in: String,
}

/// Authentication flow orchestrator
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    resolver: IdentityResolver,
    passwords: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn AccountStore>, passwords: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            resolver: IdentityResolver::new(store.clone()),
            store,
            passwords,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    fn session(&self, account: Account) -> Result<Session, BackendError> {
        let token = self.tokens.issue(&account.token_subject())?;
        Ok(Session {
            token,
            role: account.role(),
            account,
            expires_in: self.tokens.expires_in().to_string(),
        })
    }

    /// Authenticate with email and password
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown (or inactive) email and for a wrong
    /// password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let Some(ResolvedIdentity { account, role }) = self.resolver.resolve_email(email).await? else {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(BackendError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &account.password_hash).await? {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(BackendError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, role = %role, "User logged in");
        self.session(account)
    }

    /// Register a new client or seller and log them in
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if any account in any partition already uses the email
    /// - `TaxIdTaken` if a seller already uses the CNPJ
    pub async fn register(&self, registration: Registration) -> Result<Session, BackendError> {
        if self.resolver.email_in_use(&registration.email).await? {
            tracing::warn!(role = %registration.profile.role(), "Registration rejected: email taken");
            return Err(BackendError::EmailTaken);
        }

        if let Profile::Seller { cnpj, .. } = &registration.profile {
            if self.store.find_by_tax_id(cnpj).await?.is_some() {
                tracing::warn!("Registration rejected: CNPJ taken");
                return Err(BackendError::TaxIdTaken);
            }
        }

        let password_hash = self.passwords.hash(&registration.password).await?;

        let account = self
            .store
            .create(AccountDraft {
                name: registration.name,
                email: registration.email,
                password_hash,
                phone: registration.phone,
                profile: registration.profile,
                address: registration.address,
                latitude: registration.latitude,
                longitude: registration.longitude,
            })
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role(), "Account registered");
        self.session(account)
    }

    /// Re-resolve the account behind a verified token
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the account was removed or deactivated after the
    /// token was issued.
    pub async fn current_account(&self, role: Role, id: Uuid) -> Result<Account, BackendError> {
        self.resolver
            .resolve_id(role, id)
            .await?
            .map(|resolved| resolved.account)
            .ok_or(BackendError::AccountNotFound)
    }

    /// Issue a new token with a fresh expiry for the caller
    pub async fn refresh(&self, role: Role, id: Uuid) -> Result<Session, BackendError> {
        let account = self.current_account(role, id).await?;
        tracing::info!(account_id = %account.id, "Token refreshed");
        self.session(account)
    }

    /// Apply a partial profile update to the caller's account
    pub async fn update_profile(&self, role: Role, id: Uuid, update: ProfileUpdate) -> Result<Account, BackendError> {
        self.current_account(role, id).await?;

        let password_hash = match update.password {
            Some(password) => Some(self.passwords.hash(&password).await?),
            None => None,
        };

        let changes = AccountChanges {
            name: update.name,
            phone: update.phone,
            cpf: update.cpf,
            company_name: update.company_name,
            address: update.address,
            latitude: update.latitude,
            longitude: update.longitude,
            password_hash,
        };

        let account = self
            .store
            .update(role, id, changes)
            .await?
            .ok_or(BackendError::AccountNotFound)?;

        tracing::info!(account_id = %account.id, "Profile updated");
        Ok(account)
    }

    /// Soft-delete the caller's account
    pub async fn deactivate(&self, role: Role, id: Uuid) -> Result<(), BackendError> {
        if !self.store.deactivate(role, id).await? {
            return Err(BackendError::AccountNotFound);
        }
        tracing::info!(account_id = %id, role = %role, "Account deactivated");
        Ok(())
    }

    /// Active accounts, optionally restricted to one role
    pub async fn list_active(&self, role: Option<Role>) -> Result<Vec<Account>, BackendError> {
        Ok(self.store.list_active(role).await?)
    }
}

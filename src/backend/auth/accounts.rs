/**
 * Account Model
 *
 * The account record shared by every store layout, the write payloads stores
 * accept, and the sanitized representation returned by the API.
 *
 * `Account` holds the password hash and is never serialized. Everything that
 * leaves the process goes through `AccountResponse`, which has no field for it.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::backend::auth::sessions::TokenSubject;
use crate::shared::Role;

/// Role-specific account data
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Client {
        cpf: Option<String>,
    },
    Seller {
        cnpj: String,
        company_name: String,
    },
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Client { .. } => Role::Client,
            Profile::Seller { .. } => Role::Seller,
        }
    }
}

/// A stored account
#[derive(Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Normalized (trimmed, lower-case)
    pub email: String,
    /// bcrypt hash, never the plaintext
    pub password_hash: String,
    pub phone: String,
    pub profile: Profile,
    /// Free-form address object
    pub address: Value,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `false` once soft-deleted
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Account {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn cpf(&self) -> Option<&str> {
        match &self.profile {
            Profile::Client { cpf } => cpf.as_deref(),
            Profile::Seller { .. } => None,
        }
    }

    pub fn cnpj(&self) -> Option<&str> {
        match &self.profile {
            Profile::Seller { cnpj, .. } => Some(cnpj),
            Profile::Client { .. } => None,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.profile {
            Profile::Seller { company_name, .. } => Some(company_name),
            Profile::Client { .. } => None,
        }
    }

    /// Identity a session token is issued for
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role(),
        }
    }

    /// Apply a partial update in place and bump `updated_at`
    pub fn apply(&mut self, changes: AccountChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(latitude) = changes.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = changes.longitude {
            self.longitude = Some(longitude);
        }
        if let Some(hash) = changes.password_hash {
            self.password_hash = hash;
        }
        match &mut self.profile {
            Profile::Client { cpf } => {
                if let Some(new_cpf) = changes.cpf {
                    *cpf = Some(new_cpf);
                }
            }
            Profile::Seller { company_name, .. } => {
                if let Some(new_name) = changes.company_name {
                    *company_name = new_name;
                }
            }
        }
        self.updated_at = now;
    }
}

/// Data for a new account; the store assigns id and timestamps
#[derive(Clone)]
pub struct AccountDraft {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub profile: Profile,
    pub address: Value,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AccountDraft {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn profile_cnpj(&self) -> Option<&str> {
        match &self.profile {
            Profile::Seller { cnpj, .. } => Some(cnpj),
            Profile::Client { .. } => None,
        }
    }

    /// Materialize the draft as an active account
    pub fn into_account(self, id: Uuid, now: DateTime<Utc>) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            profile: self.profile,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial account update; `None` leaves a field unchanged
///
/// `cpf` only applies to clients and `company_name` only to sellers.
/// A new password arrives here already hashed.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub password_hash: Option<String>,
}

/// Account as returned to API callers
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(rename = "nomeEmpresa", skip_serializing_if = "Option::is_none")]
    pub nome_empresa: Option<String>,
    pub endereco: Value,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ativo: bool,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
    #[serde(rename = "dataAtualizacao")]
    pub data_atualizacao: DateTime<Utc>,
    pub tipo: Role,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        let (cpf, cnpj, nome_empresa) = match &account.profile {
            Profile::Client { cpf } => (cpf.clone(), None, None),
            Profile::Seller { cnpj, company_name } => (None, Some(cnpj.clone()), Some(company_name.clone())),
        };
        Self {
            id: account.id,
            nome: account.name.clone(),
            email: account.email.clone(),
            telefone: account.phone.clone(),
            cpf,
            cnpj,
            nome_empresa,
            endereco: account.address.clone(),
            latitude: account.latitude,
            longitude: account.longitude,
            ativo: account.active,
            data_criacao: account.created_at,
            data_atualizacao: account.updated_at,
            tipo: account.role(),
        }
    }
}

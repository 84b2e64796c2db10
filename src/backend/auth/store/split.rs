/**
 * Split Account Store
 *
 * Clients and sellers live in separate tables (`clients`, `sellers`). Each
 * table has its own unique email constraint, so an email shared across the
 * two tables is only caught by the registration pre-check; the unified
 * layout enforces it in one constraint.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::{into_account, into_accounts, AccountRow, CLIENT_COLUMNS, SELLER_COLUMNS};
use super::{AccountStore, Result};
use crate::backend::auth::accounts::{Account, AccountChanges, AccountDraft, Profile};
use crate::shared::Role;

/// Postgres store over `clients` and `sellers`
#[derive(Debug, Clone)]
pub struct SplitPgStore {
    pool: PgPool,
}

impl SplitPgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Client => ("clients", CLIENT_COLUMNS),
        Role::Seller => ("sellers", SELLER_COLUMNS),
    }
}

#[async_trait]
impl AccountStore for SplitPgStore {
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>> {
        let (table, columns) = table(role);
        let sql = format!("SELECT {columns} FROM {table} WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Account>> {
        let (table, columns) = table(role);
        let sql = format!("SELECT {columns} FROM {table} WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn find_by_tax_id(&self, cnpj: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE cnpj = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let row = match &draft.profile {
            Profile::Client { cpf } => {
                let sql = format!(
                    r#"
                    INSERT INTO clients (id, nome, email, senha, telefone, cpf, endereco,
                                         latitude, longitude, ativo, data_criacao, data_atualizacao)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10, $10)
                    RETURNING {CLIENT_COLUMNS}
                    "#
                );
                sqlx::query_as::<_, AccountRow>(&sql)
                    .bind(id)
                    .bind(&draft.name)
                    .bind(&draft.email)
                    .bind(&draft.password_hash)
                    .bind(&draft.phone)
                    .bind(cpf)
                    .bind(Json(&draft.address))
                    .bind(draft.latitude)
                    .bind(draft.longitude)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?
            }
            Profile::Seller { cnpj, company_name } => {
                let sql = format!(
                    r#"
                    INSERT INTO sellers (id, nome, email, senha, telefone, cnpj, nome_empresa, endereco,
                                         latitude, longitude, ativo, data_criacao, data_atualizacao)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE, $11, $11)
                    RETURNING {SELLER_COLUMNS}
                    "#
                );
                sqlx::query_as::<_, AccountRow>(&sql)
                    .bind(id)
                    .bind(&draft.name)
                    .bind(&draft.email)
                    .bind(&draft.password_hash)
                    .bind(&draft.phone)
                    .bind(cnpj)
                    .bind(company_name)
                    .bind(Json(&draft.address))
                    .bind(draft.latitude)
                    .bind(draft.longitude)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Account::try_from(row)
    }

    async fn update(&self, role: Role, id: Uuid, changes: AccountChanges) -> Result<Option<Account>> {
        let (table, columns) = table(role);
        // $4 is cpf for clients and nome_empresa for sellers
        let role_column = match role {
            Role::Client => "cpf",
            Role::Seller => "nome_empresa",
        };
        let role_value = match role {
            Role::Client => changes.cpf,
            Role::Seller => changes.company_name,
        };

        let sql = format!(
            r#"
            UPDATE {table}
            SET nome = COALESCE($2, nome),
                telefone = COALESCE($3, telefone),
                {role_column} = COALESCE($4, {role_column}),
                endereco = COALESCE($5, endereco),
                latitude = COALESCE($6, latitude),
                longitude = COALESCE($7, longitude),
                senha = COALESCE($8, senha),
                data_atualizacao = $9
            WHERE id = $1
            RETURNING {columns}
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.phone)
            .bind(role_value)
            .bind(changes.address.map(Json))
            .bind(changes.latitude)
            .bind(changes.longitude)
            .bind(changes.password_hash)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn deactivate(&self, role: Role, id: Uuid) -> Result<bool> {
        let (table, _) = table(role);
        let sql = format!("UPDATE {table} SET ativo = FALSE, data_atualizacao = $2 WHERE id = $1");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_active(&self, role: Option<Role>) -> Result<Vec<Account>> {
        let roles: &[Role] = match &role {
            Some(role) => std::slice::from_ref(role),
            None => &Role::ALL,
        };

        let mut accounts = Vec::new();
        for role in roles {
            let (table, columns) = table(*role);
            let sql = format!("SELECT {columns} FROM {table} WHERE ativo = TRUE");
            let rows = sqlx::query_as::<_, AccountRow>(&sql)
                .fetch_all(&self.pool)
                .await?;
            accounts.extend(into_accounts(rows)?);
        }
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }
}

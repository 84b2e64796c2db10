/**
 * Unified Account Store
 *
 * One `users` table for both roles, discriminated by `is_seller`. Email is
 * unique across the whole table, so cross-role uniqueness holds at the
 * storage level.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::{into_account, into_accounts, AccountRow, USER_COLUMNS};
use super::{AccountStore, Result};
use crate::backend::auth::accounts::{Account, AccountChanges, AccountDraft, Profile};
use crate::shared::Role;

/// Postgres store over `users`
#[derive(Debug, Clone)]
pub struct UnifiedPgStore {
    pool: PgPool,
}

impl UnifiedPgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for UnifiedPgStore {
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_seller = $2");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .bind(role.is_seller())
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Account>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND is_seller = $2");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(role.is_seller())
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn find_by_tax_id(&self, cnpj: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE is_seller = TRUE AND cnpj = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        into_account(row)
    }

    async fn create(&self, draft: AccountDraft) -> Result<Account> {
        let (cpf, cnpj, company_name) = match &draft.profile {
            Profile::Client { cpf } => (cpf.as_deref(), None, None),
            Profile::Seller { cnpj, company_name } => (None, Some(cnpj.as_str()), Some(company_name.as_str())),
        };

        let sql = format!(
            r#"
            INSERT INTO users (id, nome, email, senha, telefone, is_seller, cpf, cnpj, nome_empresa,
                               endereco, latitude, longitude, ativo, data_criacao, data_atualizacao)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE, $13, $13)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.password_hash)
            .bind(&draft.phone)
            .bind(draft.role().is_seller())
            .bind(cpf)
            .bind(cnpj)
            .bind(company_name)
            .bind(Json(&draft.address))
            .bind(draft.latitude)
            .bind(draft.longitude)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Account::try_from(row)
    }

    async fn update(&self, role: Role, id: Uuid, changes: AccountChanges) -> Result<Option<Account>> {
        // cpf only sticks on clients, nome_empresa only on sellers
        let (cpf, company_name) = match role {
            Role::Client => (changes.cpf, None),
            Role::Seller => (None, changes.company_name),
        };

        let sql = format!(
            r#"
            UPDATE users
            SET nome = COALESCE($3, nome),
                telefone = COALESCE($4, telefone),
                cpf = COALESCE($5, cpf),
                nome_empresa = COALESCE($6, nome_empresa),
                endereco = COALESCE($7, endereco),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                senha = COALESCE($10, senha),
                data_atualizacao = $11
            WHERE id = $1 AND is_seller = $2
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(role.is_seller())
            .bind(changes.name)
            .bind(changes.phone)
            .bind(cpf)
            .bind(company_name)
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
        let result = sqlx::query(
            "UPDATE users SET ativo = FALSE, data_atualizacao = $3 WHERE id = $1 AND is_seller = $2",
        )
        .bind(id)
        .bind(role.is_seller())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_active(&self, role: Option<Role>) -> Result<Vec<Account>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE ativo = TRUE AND ($1::boolean IS NULL OR is_seller = $1)
            ORDER BY data_criacao DESC
            "#
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(role.map(Role::is_seller))
            .fetch_all(&self.pool)
            .await?;
        into_accounts(rows)
    }
}

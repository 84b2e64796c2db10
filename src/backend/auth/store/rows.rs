/**
 * Account Rows
 *
 * Both Postgres layouts select into the same row shape. The split layout
 * fills the columns its table lacks with constants (`FALSE AS is_seller`,
 * `NULL::text AS cnpj`, ...), so one `FromRow` type and one conversion cover
 * all three tables.
 */

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

use crate::backend::auth::accounts::{Account, Profile};
use crate::backend::db::StoreError;

/// Columns selected from `clients`
pub const CLIENT_COLUMNS: &str = "id, nome, email, senha, telefone, FALSE AS is_seller, cpf, \
     NULL::text AS cnpj, NULL::text AS nome_empresa, endereco, latitude, longitude, ativo, \
     data_criacao, data_atualizacao";

/// Columns selected from `sellers`
pub const SELLER_COLUMNS: &str = "id, nome, email, senha, telefone, TRUE AS is_seller, \
     NULL::text AS cpf, cnpj, nome_empresa, endereco, latitude, longitude, ativo, \
     data_criacao, data_atualizacao";

/// Columns selected from `users`
pub const USER_COLUMNS: &str = "id, nome, email, senha, telefone, is_seller, cpf, cnpj, \
     nome_empresa, endereco, latitude, longitude, ativo, data_criacao, data_atualizacao";

#[derive(Debug, sqlx::FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub telefone: String,
    pub is_seller: bool,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub nome_empresa: Option<String>,
    pub endereco: Json<Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ativo: bool,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let profile = if row.is_seller {
            match (row.cnpj, row.nome_empresa) {
                (Some(cnpj), Some(company_name)) => Profile::Seller { cnpj, company_name },
                _ => {
                    return Err(StoreError::InvalidRow(format!(
                        "seller {} is missing cnpj or company name",
                        row.id
                    )))
                }
            }
        } else {
            Profile::Client { cpf: row.cpf }
        };

        Ok(Account {
            id: row.id,
            name: row.nome,
            email: row.email,
            password_hash: row.senha,
            phone: row.telefone,
            profile,
            address: row.endereco.0,
            latitude: row.latitude,
            longitude: row.longitude,
            active: row.ativo,
            created_at: row.data_criacao,
            updated_at: row.data_atualizacao,
        })
    }
}

/// Convert an optional row
pub fn into_account(row: Option<AccountRow>) -> Result<Option<Account>, StoreError> {
    row.map(Account::try_from).transpose()
}

/// Convert a list of rows
pub fn into_accounts(rows: Vec<AccountRow>) -> Result<Vec<Account>, StoreError> {
    rows.into_iter().map(Account::try_from).collect()
}

/**
 * Account Listing Handlers
 *
 * GET /api/auth/clients, /api/auth/sellers and /api/auth/users. Authenticated
 * callers of either role may list active accounts; responses use the
 * sanitized account shape.
 */

use axum::{extract::State, Json};
use serde::Serialize;

use crate::backend::auth::accounts::AccountResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::Role;

#[derive(Serialize, Debug)]
pub struct ClientsResponse {
    pub message: String,
    pub clients: Vec<AccountResponse>,
    pub total: usize,
}

#[derive(Serialize, Debug)]
pub struct SellersResponse {
    pub message: String,
    pub sellers: Vec<AccountResponse>,
    pub total: usize,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Breakdown {
    pub clients: usize,
    pub sellers: usize,
}

#[derive(Serialize, Debug)]
pub struct UsersResponse {
    pub message: String,
    pub users: Vec<AccountResponse>,
    pub total: usize,
    pub breakdown: Breakdown,
}

async fn active(auth: &AuthService, role: Option<Role>) -> Result<Vec<AccountResponse>, BackendError> {
    let accounts = auth.list_active(role).await?;
    Ok(accounts.iter().map(AccountResponse::from).collect())
}

pub async fn list_clients(State(auth): State<AuthService>) -> Result<Json<ClientsResponse>, BackendError> {
    let clients = active(&auth, Some(Role::Client)).await?;
    Ok(Json(ClientsResponse {
        message: "Clientes obtidos com sucesso".to_string(),
        total: clients.len(),
        clients,
    }))
}

pub async fn list_sellers(State(auth): State<AuthService>) -> Result<Json<SellersResponse>, BackendError> {
    let sellers = active(&auth, Some(Role::Seller)).await?;
    Ok(Json(SellersResponse {
        message: "Vendedores obtidos com sucesso".to_string(),
        total: sellers.len(),
        sellers,
    }))
}

/// Every active account with a per-role count
pub async fn list_users(State(auth): State<AuthService>) -> Result<Json<UsersResponse>, BackendError> {
    let users = active(&auth, None).await?;
    let sellers = users.iter().filter(|u| u.tipo == Role::Seller).count();
    Ok(Json(UsersResponse {
        message: "Usuários obtidos com sucesso".to_string(),
        total: users.len(),
        breakdown: Breakdown {
            clients: users.len() - sellers,
            sellers,
        },
        users,
    }))
}

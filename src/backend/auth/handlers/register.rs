/**
 * Registration Handlers
 *
 * POST /api/auth/register/client
 * POST /api/auth/register/seller
 *
 * Both variants validate the body, reject an email already used by any
 * account (client or seller, active or not), reject a CNPJ already used by
 * another seller, and respond 201 with a token so the new account is logged
 * in immediately.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::accounts::AccountResponse;
use crate::backend::auth::handlers::types::{AuthResponse, RegisterClientRequest, RegisterSellerRequest};
use crate::backend::auth::service::{AuthService, Registration};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::shared::Role;

async fn register(
    auth: &AuthService,
    registration: Registration,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let session = auth.register(registration).await?;

    let message = match session.role {
        Role::Client => "Cliente criado com sucesso",
        Role::Seller => "Vendedor criado com sucesso",
    };

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: message.to_string(),
            token: session.token,
            user: AccountResponse::from(&session.account),
            expires_in: session.expires_in,
        }),
    ))
}

/// Register a client account
///
/// # Errors
///
/// * `400` - validation failure
/// * `409 email_taken` - email already registered
pub async fn register_client(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<RegisterClientRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let registration = request.validate()?;
    register(&auth, registration).await
}

/// Register a seller account
///
/// # Errors
///
/// * `400` - validation failure (`cnpj` and `nomeEmpresa` are required)
/// * `409 email_taken` / `409 tax_id_taken`
pub async fn register_seller(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<RegisterSellerRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let registration = request.validate()?;
    register(&auth, registration).await
}

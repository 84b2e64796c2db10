/**
 * Profile Handlers
 *
 * GET, PUT and DELETE /api/auth/profile, always on the caller's own account.
 */

use axum::{extract::State, Json};

use crate::backend::auth::accounts::AccountResponse;
use crate::backend::auth::handlers::types::{MessageResponse, ProfileResponse, UpdateProfileRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::AuthUser;

/// Get the caller's profile
pub async fn get_profile(
    State(auth): State<AuthService>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ProfileResponse>, BackendError> {
    let account = auth.current_account(caller.role, caller.id).await?;
    Ok(Json(ProfileResponse {
        message: "Perfil obtido com sucesso".to_string(),
        user: AccountResponse::from(&account),
    }))
}

/// Update the caller's profile
///
/// Only supplied fields change. A new `senha` is re-hashed.
pub async fn update_profile(
    State(auth): State<AuthService>,
    AuthUser(caller): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let update = request.validate(caller.role)?;
    let account = auth.update_profile(caller.role, caller.id, update).await?;
    Ok(Json(ProfileResponse {
        message: "Perfil atualizado com sucesso".to_string(),
        user: AccountResponse::from(&account),
    }))
}

/// Deactivate the caller's account
///
/// Soft delete; the record and its email stay reserved. Repeating the call
/// with a still-valid token succeeds again.
pub async fn delete_profile(
    State(auth): State<AuthService>,
    AuthUser(caller): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    auth.deactivate(caller.role, caller.id).await?;
    Ok(Json(MessageResponse {
        message: "Conta desativada com sucesso".to_string(),
        instruction: None,
    }))
}

/**
 * Session Handlers
 *
 * Endpoints for callers that already hold a token. The authentication gate
 * has verified the token before these run; verify and refresh additionally
 * re-resolve the account so a token for a deactivated account stops working
 * here even before it expires.
 */

use axum::{extract::State, Json};

use crate::backend::auth::accounts::AccountResponse;
use crate::backend::auth::handlers::types::{AuthResponse, MessageResponse, TokenInfo, VerifyResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// POST /api/auth/verify
///
/// Returns the current account and the decoded token metadata.
///
/// # Errors
///
/// * `401` - token missing, invalid or expired
/// * `404 account_not_found` - account removed or deactivated since issuance
pub async fn verify(
    State(auth): State<AuthService>,
    AuthUser(caller): AuthUser,
) -> Result<Json<VerifyResponse>, BackendError> {
    let account = auth.current_account(caller.role, caller.id).await?;

    Ok(Json(VerifyResponse {
        message: "Token válido".to_string(),
        user: AccountResponse::from(&account),
        token_info: TokenInfo {
            id: caller.id,
            email: caller.email,
            tipo: caller.role,
            iat: caller.issued_at,
            exp: caller.expires_at,
        },
    }))
}

/// POST /api/auth/refresh
///
/// Issues a new token with a fresh expiry window. The old token stays valid
/// until its own expiry.
pub async fn refresh(
    State(auth): State<AuthService>,
    AuthUser(caller): AuthUser,
) -> Result<Json<AuthResponse>, BackendError> {
    let session = auth.refresh(caller.role, caller.id).await?;

    Ok(Json(AuthResponse {
        message: "Token renovado com sucesso".to_string(),
        token: session.token,
        user: AccountResponse::from(&session.account),
        expires_in: session.expires_in,
    }))
}

/// POST /api/auth/logout
///
/// Tokens are not revoked server-side; the client discards its copy.
pub async fn logout(AuthUser(caller): AuthUser) -> Json<MessageResponse> {
    tracing::info!(account_id = %caller.id, "User logged out");
    Json(MessageResponse {
        message: "Logout realizado com sucesso".to_string(),
        instruction: Some("Remova o token do armazenamento local".to_string()),
    })
}

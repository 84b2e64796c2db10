/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Validate the body (`email`, `senha`)
 * 2. Resolve the email across client and seller accounts
 * 3. Verify the password with bcrypt
 * 4. Issue a token and return it with the sanitized account
 *
 * An unknown email and a wrong password produce the same 401 body.
 */

use axum::{extract::State, Json};

use crate::backend::auth::accounts::AccountResponse;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;

/// Login handler
///
/// # Errors
///
/// * `400` - missing or invalid `email` / `senha`
/// * `401 invalid_credentials` - unknown email or wrong password
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "ana@x.com", "senha": "abcdef" }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let (email, password) = request.validate()?;

    let session = auth.login(&email, &password).await?;

    Ok(Json(AuthResponse {
        message: "Login realizado com sucesso".to_string(),
        token: session.token,
        user: AccountResponse::from(&session.account),
        expires_in: session.expires_in,
    }))
}

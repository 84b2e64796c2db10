/**
 * Access Control Middleware
 *
 * Two gates run before protected handlers:
 *
 * 1. **Authentication** (`auth_middleware`) - requires `Authorization:
 *    Bearer <token>`, verifies the token and attaches an
 *    `AuthenticatedAccount` to the request extensions. Failures are 401 with
 *    `token_missing`, `token_invalid` or `token_expired`.
 * 2. **Authorization** (`require_seller`) - compares the attached role with
 *    the role the route requires. Mismatch is 403.
 *
 * Handlers read the attached identity through the `AuthUser` extractor.
 * The gate does not look the account up; flows that need a live account
 * (verify, refresh, profile) re-resolve it themselves.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::sessions::{Claims, TokenIssuer};
use crate::backend::error::BackendError;
use crate::shared::Role;

/// Identity decoded from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<Claims> for AuthenticatedAccount {
    type Error = BackendError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims.subject_id()?;
        let (Some(issued_at), Some(expires_at)) = (claims.issued_at(), claims.expires_at()) else {
            return Err(BackendError::TokenInvalid);
        };
        Ok(Self {
            id,
            email: claims.email,
            name: claims.name,
            role: claims.tipo,
            issued_at,
            expires_at,
        })
    }
}

/// Extract the bearer token from request headers
///
/// # Errors
///
/// - `TokenMissing` if there is no `Authorization` header
/// - `TokenInvalid` if it is not `Bearer <token>` with a non-empty token
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers.get(AUTHORIZATION).ok_or(BackendError::TokenMissing)?;
    let value = header.to_str().map_err(|_| BackendError::TokenInvalid)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(BackendError::TokenInvalid)?;
    if token.is_empty() {
        return Err(BackendError::TokenInvalid);
    }
    Ok(token)
}

/// Verify the request's bearer token and decode the caller's identity
pub fn authenticate(tokens: &TokenIssuer, headers: &HeaderMap) -> Result<AuthenticatedAccount, BackendError> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;
    AuthenticatedAccount::try_from(claims)
}

/// Check that an authenticated caller holds `required`
pub fn authorize(account: &AuthenticatedAccount, required: Role) -> Result<(), BackendError> {
    if account.role == required {
        Ok(())
    } else {
        Err(BackendError::Forbidden { required })
    }
}

/// Authentication middleware
///
/// Returns 401 if the token is missing, malformed, badly signed or expired.
pub async fn auth_middleware(
    State(tokens): State<TokenIssuer>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let account = authenticate(&tokens, request.headers()).map_err(|e| {
        tracing::warn!(code = e.code(), path = %request.uri().path(), "Authentication rejected");
        e
    })?;

    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

async fn require_role(required: Role, request: Request, next: Next) -> Result<Response, BackendError> {
    let account = request
        .extensions()
        .get::<AuthenticatedAccount>()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedAccount not found in request extensions");
            BackendError::TokenMissing
        })?;

    authorize(account, required).map_err(|e| {
        tracing::warn!(account_id = %account.id, role = %account.role, required = %required, "Authorization rejected");
        e
    })?;

    Ok(next.run(request).await)
}

/// Authorization gate for seller-only routes; must run after `auth_middleware`
pub async fn require_seller(request: Request, next: Next) -> Result<Response, BackendError> {
    require_role(Role::Seller, request, next).await
}

/// Axum extractor for the authenticated caller
///
/// Reads the identity `auth_middleware` attached to the request.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedAccount);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedAccount not found in request extensions");
                BackendError::TokenMissing
            })?;

        Ok(AuthUser(account))
    }
}

/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP API. Every handler and
 * middleware returns `BackendError`, which maps onto a status code, a stable
 * machine-readable code and a human-readable message.
 *
 * # Error Categories
 *
 * | Variant               | Status | Code                  |
 * |-----------------------|--------|-----------------------|
 * | `Validation`          | 400    | `validation_error`    |
 * | `InvalidJson`         | 400    | `invalid_json`        |
 * | `InvalidPath`         | 400    | `invalid_path`        |
 * | `InvalidCredentials`  | 401    | `invalid_credentials` |
 * | `TokenMissing`        | 401    | `token_missing`       |
 * | `TokenInvalid`        | 401    | `token_invalid`       |
 * | `TokenExpired`        | 401    | `token_expired`       |
 * | `Forbidden`           | 403    | `forbidden`           |
 * | `AccountNotFound`     | 404    | `account_not_found`   |
 * | `NotFound`            | 404    | `not_found`           |
 * | `EmailTaken`          | 409    | `email_taken`         |
 * | `TaxIdTaken`          | 409    | `tax_id_taken`        |
 * | `BarcodeTaken`        | 409    | `barcode_taken`       |
 * | `Internal`            | 500    | `internal_error`      |
 *
 * # Credential Failures
 *
 * A login with an unknown email and a login with a wrong password both become
 * `InvalidCredentials`. There is deliberately no variant that tells them
 * apart, so a handler cannot leak which check failed.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::passwords::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::db::{StoreError, UniqueField};
use crate::shared::{FieldError, Role, SharedError};

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields failed validation
    #[error("Validation error: {0}")]
    Validation(SharedError),

    /// The request body is not valid JSON for the endpoint
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// A path parameter does not parse, e.g. a product id that is not a UUID
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization` header
    #[error("Token missing")]
    TokenMissing,

    /// Header present but not `Bearer <token>`, or the token failed verification
    #[error("Token invalid")]
    TokenInvalid,

    /// Token signature valid but past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Authenticated, but the route requires another role
    #[error("Forbidden: requires role {required}")]
    Forbidden {
        /// Role the route requires
        required: Role,
    },

    #[error("Email already registered")]
    EmailTaken,

    #[error("CNPJ already registered")]
    TaxIdTaken,

    #[error("Barcode already registered for this seller")]
    BarcodeTaken,

    /// The authenticated account no longer resolves (removed or deactivated)
    #[error("Account not found")]
    AccountNotFound,

    /// A resource other than the caller's account was not found
    #[error("{resource} not found")]
    NotFound {
        /// What was looked up, e.g. "Produto"
        resource: String,
    },

    /// Backing-store, hashing or signing fault
    #[error("Internal error: {message}")]
    Internal {
        /// Detail; only shown to callers in development
        message: String,
    },
}

impl BackendError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a not-found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson(_) | Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::TokenMissing
            | Self::TokenInvalid
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::AccountNotFound | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::TaxIdTaken | Self::BarcodeTaken => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidJson(_) => "invalid_json",
            Self::InvalidPath(_) => "invalid_path",
            Self::InvalidCredentials => "invalid_credentials",
            Self::TokenMissing => "token_missing",
            Self::TokenInvalid => "token_invalid",
            Self::TokenExpired => "token_expired",
            Self::Forbidden { .. } => "forbidden",
            Self::EmailTaken => "email_taken",
            Self::TaxIdTaken => "tax_id_taken",
            Self::BarcodeTaken => "barcode_taken",
            Self::AccountNotFound => "account_not_found",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Human-readable message returned to API callers
    ///
    /// `Internal` detail is handled by the response conversion, which decides
    /// whether it may be shown.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(_) => "Dados inválidos".to_string(),
            Self::InvalidJson(_) => "Verifique a sintaxe do JSON enviado".to_string(),
            Self::InvalidPath(_) => "Parâmetro de rota inválido".to_string(),
            Self::InvalidCredentials => "Email ou senha incorretos".to_string(),
            Self::TokenMissing => "Token de acesso não fornecido".to_string(),
            Self::TokenInvalid => "Token malformado ou inválido".to_string(),
            Self::TokenExpired => "Token expirado. Faça login novamente".to_string(),
            Self::Forbidden { required: Role::Seller } => {
                "Acesso permitido apenas para vendedores".to_string()
            }
            Self::Forbidden { required: Role::Client } => {
                "Acesso permitido apenas para clientes".to_string()
            }
            Self::EmailTaken => "Este email já está cadastrado".to_string(),
            Self::TaxIdTaken => "Este CNPJ já está cadastrado".to_string(),
            Self::BarcodeTaken => "Você já possui um produto com este código de barras".to_string(),
            Self::AccountNotFound => "Usuário não encontrado".to_string(),
            Self::NotFound { resource } => format!("{resource} não encontrado"),
            Self::Internal { message } => message.clone(),
        }
    }

    /// Field-level detail for validation errors
    pub fn details(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(err) => Some(err.field_errors()),
            _ => None,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(UniqueField::Email) => Self::EmailTaken,
            StoreError::Conflict(UniqueField::TaxId) => Self::TaxIdTaken,
            StoreError::Conflict(UniqueField::Barcode) => Self::BarcodeTaken,
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Malformed | TokenError::InvalidSignature => Self::TokenInvalid,
            TokenError::Signing(message) => Self::internal(format!("token signing failed: {message}")),
        }
    }
}

impl From<PasswordError> for BackendError {
    fn from(err: PasswordError) -> Self {
        Self::internal(err.to_string())
    }
}

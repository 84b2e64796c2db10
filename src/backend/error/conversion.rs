/**
 * Error Conversion
 *
 * This module provides the `IntoResponse` implementation for backend errors,
 * allowing handlers to return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "validation_error",
 *   "message": "Dados inválidos",
 *   "status": 400,
 *   "details": [{ "field": "email", "message": "Email deve ser válido" }]
 * }
 * ```
 *
 * `details` is only present for validation errors. Internal errors carry a
 * generic message unless detail exposure was enabled at startup (development).
 */

use std::sync::OnceLock;

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

const GENERIC_INTERNAL_MESSAGE: &str = "Algo deu errado. Tente novamente mais tarde.";

static EXPOSE_INTERNAL: OnceLock<bool> = OnceLock::new();

/// Decide once whether internal error detail is shown to callers
///
/// Later calls are ignored. Until it is called, detail is hidden.
pub fn expose_internal_errors(expose: bool) {
    let _ = EXPOSE_INTERNAL.set(expose);
}

fn internal_detail_exposed() -> bool {
    EXPOSE_INTERNAL.get().copied().unwrap_or(false)
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            BackendError::Internal { message } => {
                tracing::error!(error = %message, "Internal server error");
                if internal_detail_exposed() {
                    message.clone()
                } else {
                    GENERIC_INTERNAL_MESSAGE.to_string()
                }
            }
            other => other.message(),
        };

        let mut body = serde_json::json!({
            "error": self.code(),
            "message": message,
            "status": status.as_u16(),
        });
        if let Some(details) = self.details() {
            body["details"] = serde_json::json!(details);
        }

        (status, Json(body)).into_response()
    }
}

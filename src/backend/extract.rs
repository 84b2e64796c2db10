//! Request extractors
//!
//! Same as `axum::Json` and `axum::extract::Path`, but a body or path that
//! fails to parse is rejected with the API's JSON error format
//! (`400 invalid_json`, `400 invalid_path`) instead of axum's plain-text
//! rejection.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Rejected request body");
                Err(BackendError::InvalidJson(rejection_detail(&rejection)))
            }
        }
    }
}

fn rejection_detail(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json".to_string(),
        other => other.body_text(),
    }
}

/// Typed path parameters
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(PathRejection::FailedToDeserializePathParams(rejection)) => {
                tracing::warn!(path = %parts.uri.path(), error = %rejection.body_text(), "Rejected path parameter");
                Err(BackendError::InvalidPath(rejection.body_text()))
            }
            // The route declares no such parameter: a routing bug, not a bad request
            Err(other) => Err(BackendError::internal(other.body_text())),
        }
    }
}

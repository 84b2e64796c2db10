/**
 * Router Configuration
 *
 * Combines the API route groups, the health check and the JSON 404/405
 * fallbacks into one router, then wraps it in CORS and request tracing.
 */

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", axum::routing::get(health));
    let router = configure_api_routes(router, &app_state);

    let cors = cors_layer(&app_state.config.allowed_origins);

    // Must follow every route: it only reaches routes registered so far
    router
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// CORS policy from the configured origins; any origin when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}

/// GET /health
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Rota não encontrada",
            "status": StatusCode::NOT_FOUND.as_u16(),
            "path": uri.path(),
        })),
    )
}

async fn method_not_allowed(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "method_not_allowed",
            "message": format!("Método {method} não permitido nesta rota"),
            "status": StatusCode::METHOD_NOT_ALLOWED.as_u16(),
            "path": uri.path(),
        })),
    )
}

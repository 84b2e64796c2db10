//! Health check and fallback

use axum::http::StatusCode;

use crate::common::*;
use crate::{assert_api_error, assert_status};

#[tokio::test]
async fn test_health() {
    let server = create_test_server();

    let body = assert_status!(server.get("/health").await, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = create_test_server();

    let response = server.get("/api/nothing-here").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["path"], "/api/nothing-here");
}

#[tokio::test]
async fn test_gates_do_not_shadow_unknown_routes() {
    let server = create_test_server();

    let response = server.get("/api/auth/does-not-exist").await;

    assert_api_error!(response, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let server = create_test_server();

    let response = server.get("/api/auth/login").await;

    let body = assert_api_error!(response, StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed");
    assert_eq!(body["path"], "/api/auth/login");
}

#[tokio::test]
async fn test_wrong_method_on_gated_route_is_json_405() {
    let server = create_test_server();

    let response = server.patch("/api/products").await;

    assert_api_error!(response, StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed");
}

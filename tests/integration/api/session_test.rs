//! Token verification, refresh and logout

use std::time::Duration as StdDuration;

use axum::http::{header, HeaderValue, StatusCode};
use chrono::{Duration, Utc};
use uuid::Uuid;

use compra_pronta::backend::auth::{TokenIssuer, TokenSubject};
use compra_pronta::shared::Role;

use crate::common::*;
use crate::{assert_api_error, assert_status};

#[tokio::test]
async fn test_missing_token() {
    let server = create_test_server();

    let response = server.post("/api/auth/verify").await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_missing");
}

#[tokio::test]
async fn test_malformed_tokens() {
    let server = create_test_server();

    for value in ["Basic abc", "Bearer ", "Bearer not.a.token"] {
        let response = server
            .post("/api/auth/verify")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .await;
        assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_invalid");
    }
}

#[tokio::test]
async fn test_token_signed_with_other_key() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;

    let other_key = TokenIssuer::new(b"not-the-server-secret", StdDuration::from_secs(3600), "1h");
    let forged = other_key
        .issue(&TokenSubject {
            id: user.id,
            email: user.email.clone(),
            name: "Ana Souza".to_string(),
            role: Role::Client,
        })
        .unwrap();

    let response = server
        .post("/api/auth/verify")
        .add_header(header::AUTHORIZATION, auth_header(&forged))
        .await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_invalid");
}

#[tokio::test]
async fn test_tampered_signature() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;

    let mut tampered = user.token.clone();
    tampered.push('x');

    let response = server
        .post("/api/auth/verify")
        .add_header(header::AUTHORIZATION, auth_header(&tampered))
        .await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_invalid");
}

#[tokio::test]
async fn test_expired_token() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;
    let token = token_issued_at(user.id, &user.email, Role::Client, Utc::now() - Duration::hours(48));

    let response = server
        .post("/api/auth/verify")
        .add_header(header::AUTHORIZATION, auth_header(&token))
        .await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_expired");
}

#[tokio::test]
async fn test_verify_returns_account_and_token_info() {
    let server = create_test_server();
    let user = register_seller(&server, "joao@loja.com", "1").await;

    let response = server
        .post("/api/auth/verify")
        .add_header(header::AUTHORIZATION, auth_header(&user.token))
        .await;

    let body = assert_status!(response, StatusCode::OK);
    assert_eq!(body["message"], "Token válido");
    assert_eq!(body["user"]["email"], "joao@loja.com");
    assert_eq!(body["tokenInfo"]["id"], user.id.to_string());
    assert_eq!(body["tokenInfo"]["tipo"], "vendedor");
    assert!(body["tokenInfo"]["exp"].is_string());
}

#[tokio::test]
async fn test_valid_token_for_unknown_account() {
    let server = create_test_server();
    let token = token_issued_at(Uuid::new_v4(), "ghost@x.com", Role::Client, Utc::now());

    let response = server
        .post("/api/auth/verify")
        .add_header(header::AUTHORIZATION, auth_header(&token))
        .await;

    assert_api_error!(response, StatusCode::NOT_FOUND, "account_not_found");
}

#[tokio::test]
async fn test_refresh_issues_working_token() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;

    let response = server
        .post("/api/auth/refresh")
        .add_header(header::AUTHORIZATION, auth_header(&user.token))
        .await;
    let body = assert_status!(response, StatusCode::OK);
    assert_eq!(body["message"], "Token renovado com sucesso");

    let refreshed = body["token"].as_str().unwrap();
    let response = server
        .get("/api/auth/profile")
        .add_header(header::AUTHORIZATION, auth_header(refreshed))
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;

    let response = server
        .post("/api/auth/logout")
        .add_header(header::AUTHORIZATION, auth_header(&user.token))
        .await;

    let body = assert_status!(response, StatusCode::OK);
    assert_eq!(body["message"], "Logout realizado com sucesso");
    assert_eq!(body["instruction"], "Remova o token do armazenamento local");
}

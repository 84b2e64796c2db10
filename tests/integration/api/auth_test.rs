//! Authentication API integration tests
//!
//! Registration and login for both roles.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_api_error, assert_status};

#[tokio::test]
async fn test_register_client_returns_token_without_password() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/register/client")
        .json(&client_payload("ana@x.com"))
        .await;

    let body = assert_status!(response, StatusCode::CREATED);
    assert_eq!(body["message"], "Cliente criado com sucesso");
    assert_eq!(body["expiresIn"], "1h");
    assert!(!body["token"].as_str().unwrap().is_empty());

    let user = &body["user"];
    assert_eq!(user["tipo"], "cliente");
    assert_eq!(user["email"], "ana@x.com");
    assert_eq!(user["ativo"], true);
    assert_eq!(user["endereco"]["cidade"], "São Paulo");
    assert!(user.get("senha").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(user.get("cnpj").is_none());
}

#[tokio::test]
async fn test_register_seller() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/register/seller")
        .json(&seller_payload("joao@loja.com", "12345678000199"))
        .await;

    let body = assert_status!(response, StatusCode::CREATED);
    assert_eq!(body["message"], "Vendedor criado com sucesso");
    assert_eq!(body["user"]["tipo"], "vendedor");
    assert_eq!(body["user"]["cnpj"], "12345678000199");
    assert_eq!(body["user"]["nomeEmpresa"], "Mercadinho do João");
    assert_eq!(body["user"]["latitude"], Value::Null);
    assert_eq!(body["user"]["endereco"], json!({}));
}

#[tokio::test]
async fn test_register_validation_reports_every_field() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/register/seller")
        .json(&json!({ "nome": "J", "email": "not-an-email", "senha": "123" }))
        .await;

    let body = assert_api_error!(response, StatusCode::BAD_REQUEST, "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["nome", "email", "senha", "cnpj", "nomeEmpresa"]);
}

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server();
    let user = register_client(&server, "ana@x.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "senha": TEST_PASSWORD }))
        .await;

    let body = assert_status!(response, StatusCode::OK);
    assert_eq!(body["message"], "Login realizado com sucesso");
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["tipo"], "cliente");
}

#[tokio::test]
async fn test_login_finds_seller_with_normalized_email() {
    let server = create_test_server();
    register_seller(&server, "joao@loja.com", "1").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "  JOAO@Loja.com ", "senha": TEST_PASSWORD }))
        .await;

    let body = assert_status!(response, StatusCode::OK);
    assert_eq!(body["user"]["tipo"], "vendedor");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server();
    register_client(&server, "ana@x.com").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@x.com", "senha": "errada123" }))
        .await;
    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ninguem@x.com", "senha": TEST_PASSWORD }))
        .await;

    let first = assert_api_error!(wrong_password, StatusCode::UNAUTHORIZED, "invalid_credentials");
    let second = assert_api_error!(unknown_email, StatusCode::UNAUTHORIZED, "invalid_credentials");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_email_is_unique_across_roles() {
    let server = create_test_server();
    register_client(&server, "ana@x.com").await;

    let response = server
        .post("/api/auth/register/seller")
        .json(&seller_payload("ANA@x.com", "999"))
        .await;

    assert_api_error!(response, StatusCode::CONFLICT, "email_taken");
}

#[tokio::test]
async fn test_duplicate_cnpj_is_rejected() {
    let server = create_test_server();
    register_seller(&server, "a@loja.com", "12345678000199").await;

    let response = server
        .post("/api/auth/register/seller")
        .json(&seller_payload("b@loja.com", "12345678000199"))
        .await;

    assert_api_error!(response, StatusCode::CONFLICT, "tax_id_taken");
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = create_test_server();

    let response = server.post("/api/auth/login").text("{\"email\": ").await;

    assert_api_error!(response, StatusCode::BAD_REQUEST, "invalid_json");
}

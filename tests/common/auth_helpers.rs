//! Authentication test helpers
//!
//! Builds an in-memory server (bcrypt cost 4, one hour tokens) and provides
//! shortcuts for registering accounts and attaching bearer tokens.

use std::time::Duration;

use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use compra_pronta::backend::auth::{TokenIssuer, TokenSubject};
use compra_pronta::backend::routes::create_router;
use compra_pronta::backend::server::build_state;
use compra_pronta::shared::{AppConfig, Environment, Role, StoreLayout};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "senha123";

/// Registered account with its token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .environment(Environment::Test)
        .store(StoreLayout::Memory)
        .jwt_secret(TEST_SECRET)
        .token_lifetime("1h")
        .bcrypt_rounds(4)
        .build()
        .expect("test configuration is valid")
}

/// Create a server backed by in-memory stores
pub fn create_test_server() -> TestServer {
    let state = build_state(test_config(), None).expect("memory state builds");
    TestServer::new(create_router(state)).unwrap()
}

/// `Authorization` header value for a token
pub fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Sign a token with the test secret as if it had been issued at `issued_at`
pub fn token_issued_at(id: Uuid, email: &str, role: Role, issued_at: DateTime<Utc>) -> String {
    let issuer = TokenIssuer::new(TEST_SECRET.as_bytes(), Duration::from_secs(3600), "1h");
    let subject = TokenSubject {
        id,
        email: email.to_string(),
        name: "Teste".to_string(),
        role,
    };
    issuer.issue_at(&subject, issued_at).unwrap()
}

pub fn client_payload(email: &str) -> Value {
    json!({
        "nome": "Ana Souza",
        "email": email,
        "senha": TEST_PASSWORD,
        "telefone": "11999990000",
        "endereco": { "rua": "Rua das Flores", "numero": "10", "cidade": "São Paulo" },
        "latitude": -23.55,
        "longitude": -46.63
    })
}

pub fn seller_payload(email: &str, cnpj: &str) -> Value {
    json!({
        "nome": "João Lima",
        "email": email,
        "senha": TEST_PASSWORD,
        "cnpj": cnpj,
        "nomeEmpresa": "Mercadinho do João"
    })
}

async fn register(server: &TestServer, path: &str, payload: Value) -> TestUser {
    let response = server.post(path).json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
        email: body["user"]["email"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub async fn register_client(server: &TestServer, email: &str) -> TestUser {
    register(server, "/api/auth/register/client", client_payload(email)).await
}

pub async fn register_seller(server: &TestServer, email: &str, cnpj: &str) -> TestUser {
    register(server, "/api/auth/register/seller", seller_payload(email, cnpj)).await
}

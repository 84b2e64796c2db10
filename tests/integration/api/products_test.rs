//! Seller product catalog

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::common::*;
use crate::{assert_api_error, assert_status};

fn product(barcode: &str) -> Value {
    json!({
        "name": "Arroz Integral",
        "description": "Pacote de arroz integral tipo 1",
        "price": 12.5,
        "category": "Mercearia",
        "barcode": barcode,
        "stock": 30,
        "isSoldByWeight": false,
        "imageUrl": "https://cdn.example.com/arroz.png"
    })
}

#[tokio::test]
async fn test_products_require_token() {
    let server = create_test_server();

    let response = server.get("/api/products").await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED, "token_missing");
}

#[tokio::test]
async fn test_client_is_forbidden() {
    let server = create_test_server();
    let client = register_client(&server, "ana@x.com").await;

    let response = server
        .get("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&client.token))
        .await;

    assert_api_error!(response, StatusCode::FORBIDDEN, "forbidden");
}

#[tokio::test]
async fn test_product_lifecycle() {
    let server = create_test_server();
    let seller = register_seller(&server, "joao@loja.com", "1").await;
    let auth = auth_header(&seller.token);

    let created = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&product("7891000100103"))
        .await;
    let body = assert_status!(created, StatusCode::CREATED);
    assert_eq!(body["message"], "Produto criado com sucesso");
    assert_eq!(body["product"]["sellerId"], seller.id.to_string());
    assert_eq!(body["product"]["price"].as_f64(), Some(12.5));
    assert_eq!(body["product"]["isAvailable"], true);
    assert_eq!(body["product"]["pricePerKg"], Value::Null);
    let id = body["product"]["id"].as_str().unwrap().to_string();

    let listed = server
        .get("/api/products")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let body = assert_status!(listed, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let barcode = server
        .get("/api/products/barcode/7891000100103")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let body = assert_status!(barcode, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["product"]["id"], id.as_str());

    let mut changed = product("7891000100103");
    changed["stock"] = json!(5);
    let updated = server
        .put(&format!("/api/products/{id}"))
        .add_header(header::AUTHORIZATION, auth.clone())
        .json(&changed)
        .await;
    let body = assert_status!(updated, StatusCode::OK);
    assert_eq!(body["product"]["stock"], 5);

    let deleted = server
        .delete(&format!("/api/products/{id}"))
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let body = assert_status!(deleted, StatusCode::OK);
    assert_eq!(body["productId"], id.as_str());

    let gone = server
        .get(&format!("/api/products/{id}"))
        .add_header(header::AUTHORIZATION, auth)
        .await;
    assert_api_error!(gone, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_barcode_unique_per_seller() {
    let server = create_test_server();
    let first = register_seller(&server, "a@loja.com", "1").await;
    let second = register_seller(&server, "b@loja.com", "2").await;

    let created = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&first.token))
        .json(&product("123"))
        .await;
    assert_status!(created, StatusCode::CREATED);

    let duplicate = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&first.token))
        .json(&product("123"))
        .await;
    assert_api_error!(duplicate, StatusCode::CONFLICT, "barcode_taken");

    let other_seller = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&second.token))
        .json(&product("123"))
        .await;
    assert_status!(other_seller, StatusCode::CREATED);
}

#[tokio::test]
async fn test_sellers_only_see_their_own_products() {
    let server = create_test_server();
    let owner = register_seller(&server, "a@loja.com", "1").await;
    let other = register_seller(&server, "b@loja.com", "2").await;

    let created = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&owner.token))
        .json(&product("123"))
        .await;
    let body = assert_status!(created, StatusCode::CREATED);
    let id = body["product"]["id"].as_str().unwrap().to_string();

    let response = server
        .get(&format!("/api/products/{id}"))
        .add_header(header::AUTHORIZATION, auth_header(&other.token))
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_sold_by_weight_zeroes_price_and_stock() {
    let server = create_test_server();
    let seller = register_seller(&server, "joao@loja.com", "1").await;

    let mut payload = product("456");
    payload["isSoldByWeight"] = json!(true);
    payload["pricePerKg"] = json!(39.9);

    let response = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&seller.token))
        .json(&payload)
        .await;

    let body = assert_status!(response, StatusCode::CREATED);
    assert_eq!(body["product"]["price"].as_f64(), Some(0.0));
    assert_eq!(body["product"]["stock"], 0);
    assert_eq!(body["product"]["pricePerKg"].as_f64(), Some(39.9));
}

#[tokio::test]
async fn test_invalid_product_is_rejected() {
    let server = create_test_server();
    let seller = register_seller(&server, "joao@loja.com", "1").await;

    let response = server
        .post("/api/products")
        .add_header(header::AUTHORIZATION, auth_header(&seller.token))
        .json(&json!({ "name": "A", "price": -1, "imageUrl": "ftp://x" }))
        .await;

    let body = assert_api_error!(response, StatusCode::BAD_REQUEST, "validation_error");
    assert!(body["details"].as_array().unwrap().len() >= 4);
}

#[tokio::test]
async fn test_non_uuid_product_id_is_json_400() {
    let server = create_test_server();
    let seller = register_seller(&server, "joao@loja.com", "1").await;

    for request in [
        server.get("/api/products/not-a-uuid"),
        server.delete("/api/products/not-a-uuid"),
        server.put("/api/products/not-a-uuid").json(&product("7891000100103")),
    ] {
        let response = request
            .add_header(header::AUTHORIZATION, auth_header(&seller.token))
            .await;
        let body = assert_api_error!(response, StatusCode::BAD_REQUEST, "invalid_path");
        assert_eq!(body["message"], "Parâmetro de rota inválido");
    }
}

#[tokio::test]
async fn test_deactivated_seller_keeps_gate_access_until_expiry() {
    let server = create_test_server();
    let seller = register_seller(&server, "joao@loja.com", "1").await;
    let auth = auth_header(&seller.token);

    let response = server
        .delete("/api/auth/profile")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    assert_status!(response, StatusCode::OK);

    // Product routes only run the gates, which never look the account up
    let products = server
        .get("/api/products")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    let body = assert_status!(products, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let profile = server
        .get("/api/auth/profile")
        .add_header(header::AUTHORIZATION, auth.clone())
        .await;
    assert_api_error!(profile, StatusCode::NOT_FOUND, "account_not_found");

    let refresh = server
        .post("/api/auth/refresh")
        .add_header(header::AUTHORIZATION, auth)
        .await;
    assert_api_error!(refresh, StatusCode::NOT_FOUND, "account_not_found");
}

//! Account stores against Postgres
//!
//! The same scenarios run on the split (`clients` + `sellers`) and unified
//! (`users`) layouts.

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;

use compra_pronta::backend::auth::accounts::{AccountChanges, AccountDraft, Profile};
use compra_pronta::backend::auth::store::{AccountStore, SplitPgStore, UnifiedPgStore};
use compra_pronta::backend::db::{StoreError, UniqueField};
use compra_pronta::shared::Role;

use crate::common::database::{create_test_pool, unique, unique_email};

fn client_draft(email: &str) -> AccountDraft {
    AccountDraft {
        name: "Ana Souza".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$clienthash".to_string(),
        phone: "11999990000".to_string(),
        profile: Profile::Client { cpf: None },
        address: json!({ "rua": "Rua das Flores", "cidade": "São Paulo" }),
        latitude: Some(-23.55),
        longitude: None,
    }
}

fn seller_draft(email: &str, cnpj: &str) -> AccountDraft {
    AccountDraft {
        name: "João Lima".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$sellerhash".to_string(),
        phone: String::new(),
        profile: Profile::Seller {
            cnpj: cnpj.to_string(),
            company_name: "Mercadinho do João".to_string(),
        },
        address: json!({}),
        latitude: None,
        longitude: None,
    }
}

async fn split_store() -> SplitPgStore {
    SplitPgStore::new(create_test_pool().await)
}

async fn unified_store() -> UnifiedPgStore {
    UnifiedPgStore::new(create_test_pool().await)
}

async fn create_and_find(store: &dyn AccountStore) {
    let email = unique_email();
    let client = store.create(client_draft(&email)).await.unwrap();
    assert!(client.active);
    assert_eq!(client.role(), Role::Client);
    assert_eq!(client.cpf(), None);
    assert_eq!(client.latitude, Some(-23.55));
    assert_eq!(client.longitude, None);
    assert_eq!(client.address["cidade"], "São Paulo");

    let by_email = store.find_by_email(Role::Client, &email).await.unwrap().unwrap();
    assert_eq!(by_email.id, client.id);
    assert_eq!(by_email.password_hash, "$2b$04$clienthash");
    assert!(store.find_by_email(Role::Seller, &email).await.unwrap().is_none());
    assert!(store.find_by_id(Role::Seller, client.id).await.unwrap().is_none());

    let cnpj = unique("cnpj-");
    let seller = store.create(seller_draft(&unique_email(), &cnpj)).await.unwrap();
    assert_eq!(seller.role(), Role::Seller);
    assert_eq!(seller.cpf(), None);

    let by_tax_id = store.find_by_tax_id(&cnpj).await.unwrap().unwrap();
    assert_eq!(by_tax_id.id, seller.id);
    assert_eq!(by_tax_id.company_name(), Some("Mercadinho do João"));
    assert!(store.find_by_id(Role::Client, seller.id).await.unwrap().is_none());
    assert!(store.find_by_email(Role::Seller, &unique_email()).await.unwrap().is_none());
}

async fn partial_update(store: &dyn AccountStore) {
    let client = store.create(client_draft(&unique_email())).await.unwrap();

    let changes = AccountChanges {
        name: Some("Ana Maria".to_string()),
        cpf: Some("11122233344".to_string()),
        company_name: Some("Ignorada".to_string()),
        ..Default::default()
    };
    let updated = store.update(Role::Client, client.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.cpf(), Some("11122233344"));
    assert_eq!(updated.company_name(), None);
    assert_eq!(updated.phone, client.phone);
    assert_eq!(updated.address, client.address);
    assert_eq!(updated.latitude, client.latitude);
    assert_eq!(updated.password_hash, client.password_hash);
    assert!(updated.updated_at >= client.updated_at);

    let seller = store
        .create(seller_draft(&unique_email(), &unique("cnpj-")))
        .await
        .unwrap();
    let changes = AccountChanges {
        company_name: Some("Empório Lima".to_string()),
        cpf: Some("11122233344".to_string()),
        password_hash: Some("$2b$04$newhash".to_string()),
        ..Default::default()
    };
    let updated = store.update(Role::Seller, seller.id, changes).await.unwrap().unwrap();
    assert_eq!(updated.company_name(), Some("Empório Lima"));
    assert_eq!(updated.cnpj(), seller.cnpj());
    assert_eq!(updated.cpf(), None);
    assert_eq!(updated.password_hash, "$2b$04$newhash");

    let missing = store
        .update(Role::Client, Uuid::new_v4(), AccountChanges::default())
        .await
        .unwrap();
    assert!(missing.is_none());
    let wrong_role = store
        .update(Role::Seller, client.id, AccountChanges::default())
        .await
        .unwrap();
    assert!(wrong_role.is_none());
}

async fn deactivate_and_list(store: &dyn AccountStore) {
    let client = store.create(client_draft(&unique_email())).await.unwrap();
    let seller = store
        .create(seller_draft(&unique_email(), &unique("cnpj-")))
        .await
        .unwrap();

    let everyone = store.list_active(None).await.unwrap();
    let client_pos = everyone.iter().position(|a| a.id == client.id).unwrap();
    let seller_pos = everyone.iter().position(|a| a.id == seller.id).unwrap();
    assert!(seller_pos < client_pos, "newest accounts come first");

    assert!(store.deactivate(Role::Client, client.id).await.unwrap());
    assert!(store.deactivate(Role::Client, client.id).await.unwrap());
    assert!(!store.deactivate(Role::Client, Uuid::new_v4()).await.unwrap());
    assert!(!store.deactivate(Role::Seller, client.id).await.unwrap());

    let stored = store.find_by_id(Role::Client, client.id).await.unwrap().unwrap();
    assert!(!stored.active);

    let everyone = store.list_active(None).await.unwrap();
    assert!(everyone.iter().all(|a| a.active));
    assert!(everyone.iter().all(|a| a.id != client.id));
    assert!(everyone.iter().any(|a| a.id == seller.id));

    let sellers = store.list_active(Some(Role::Seller)).await.unwrap();
    assert!(sellers.iter().all(|a| a.role() == Role::Seller));
    assert!(sellers.iter().any(|a| a.id == seller.id));

    let clients = store.list_active(Some(Role::Client)).await.unwrap();
    assert!(clients.iter().all(|a| a.role() == Role::Client));
    assert!(clients.iter().all(|a| a.id != seller.id));
}

async fn duplicates_conflict(store: &dyn AccountStore) {
    let email = unique_email();
    store.create(client_draft(&email)).await.unwrap();
    assert_matches!(
        store.create(client_draft(&email)).await,
        Err(StoreError::Conflict(UniqueField::Email))
    );

    let cnpj = unique("cnpj-");
    store.create(seller_draft(&unique_email(), &cnpj)).await.unwrap();
    assert_matches!(
        store.create(seller_draft(&unique_email(), &cnpj)).await,
        Err(StoreError::Conflict(UniqueField::TaxId))
    );
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_split_create_and_find() {
    create_and_find(&split_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unified_create_and_find() {
    create_and_find(&unified_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_split_partial_update() {
    partial_update(&split_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unified_partial_update() {
    partial_update(&unified_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_split_deactivate_and_list() {
    deactivate_and_list(&split_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unified_deactivate_and_list() {
    deactivate_and_list(&unified_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_split_duplicates_conflict() {
    duplicates_conflict(&split_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unified_duplicates_conflict() {
    duplicates_conflict(&unified_store().await).await;
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_unified_email_unique_across_roles() {
    let store = unified_store().await;
    let email = unique_email();
    store.create(client_draft(&email)).await.unwrap();

    let result = store.create(seller_draft(&email, &unique("cnpj-"))).await;

    assert_matches!(result, Err(StoreError::Conflict(UniqueField::Email)));
}

#[tokio::test]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn test_split_email_unique_per_table_only() {
    let store = split_store().await;
    let email = unique_email();
    store.create(client_draft(&email)).await.unwrap();

    // Cross-role uniqueness is left to the registration pre-check here
    let seller = store.create(seller_draft(&email, &unique("cnpj-"))).await.unwrap();

    assert_eq!(seller.role(), Role::Seller);
    assert!(store.find_by_email(Role::Client, &email).await.unwrap().is_some());
}

/**
 * Product Handlers
 *
 * Seller-only catalog endpoints under `/api/products`. The router puts the
 * authentication gate and the seller gate in front of every route here, so
 * handlers can take the caller's id as the owning seller.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::products::model::{Product, ProductDraft, ProductRequest};
use crate::backend::products::store::ProductStore;

/// Shared product store handle
pub type Products = Arc<dyn ProductStore>;

#[derive(Serialize, Debug)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Serialize, Debug)]
pub struct ProductListResponse {
    pub message: String,
    pub products: Vec<Product>,
    pub total: usize,
}

#[derive(Serialize, Debug)]
pub struct DeleteResponse {
    pub message: String,
    #[serde(rename = "productId")]
    pub product_id: Uuid,
}

/// Minimal product reference returned by the barcode check
#[derive(Serialize, Debug)]
pub struct ProductRef {
    pub id: Uuid,
    pub name: String,
    pub barcode: String,
}

#[derive(Serialize, Debug)]
pub struct BarcodeResponse {
    pub message: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

fn product_not_found() -> BackendError {
    BackendError::not_found("Produto")
}

/// Reject a barcode the seller already uses on another product
async fn ensure_barcode_free(
    store: &Products,
    seller_id: Uuid,
    draft: &ProductDraft,
    except: Option<Uuid>,
) -> Result<(), BackendError> {
    if let Some(existing) = store.find_by_barcode(seller_id, &draft.barcode).await? {
        if Some(existing.id) != except {
            tracing::warn!(seller_id = %seller_id, "Product rejected: barcode already in use");
            return Err(BackendError::BarcodeTaken);
        }
    }
    Ok(())
}

/// POST /api/products
pub async fn create_product(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), BackendError> {
    let draft = request.validate()?;
    ensure_barcode_free(&store, caller.id, &draft, None).await?;

    let product = store.create(caller.id, draft).await?;
    tracing::info!(product_id = %product.id, seller_id = %caller.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Produto criado com sucesso".to_string(),
            product,
        }),
    ))
}

/// GET /api/products
pub async fn list_products(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
) -> Result<Json<ProductListResponse>, BackendError> {
    let products = store.list(caller.id).await?;
    Ok(Json(ProductListResponse {
        message: "Produtos listados com sucesso".to_string(),
        total: products.len(),
        products,
    }))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ProductResponse>, BackendError> {
    let product = store.find(caller.id, id).await?.ok_or_else(product_not_found)?;
    Ok(Json(ProductResponse {
        message: "Produto encontrado".to_string(),
        product,
    }))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ProductRequest>,
) -> Result<Json<ProductResponse>, BackendError> {
    let draft = request.validate()?;
    ensure_barcode_free(&store, caller.id, &draft, Some(id)).await?;

    let product = store
        .replace(caller.id, id, draft)
        .await?
        .ok_or_else(product_not_found)?;
    tracing::info!(product_id = %product.id, seller_id = %caller.id, "Product updated");

    Ok(Json(ProductResponse {
        message: "Produto atualizado com sucesso".to_string(),
        product,
    }))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeleteResponse>, BackendError> {
    if !store.delete(caller.id, id).await? {
        return Err(product_not_found());
    }
    tracing::info!(product_id = %id, seller_id = %caller.id, "Product deleted");
    Ok(Json(DeleteResponse {
        message: "Produto deletado com sucesso".to_string(),
        product_id: id,
    }))
}

/// GET /api/products/barcode/{barcode}
///
/// Reports whether the caller can still use `barcode` for a new product.
pub async fn check_barcode(
    State(store): State<Products>,
    AuthUser(caller): AuthUser,
    ApiPath(barcode): ApiPath<String>,
) -> Result<Json<BarcodeResponse>, BackendError> {
    let existing = store.find_by_barcode(caller.id, barcode.trim()).await?;
    Ok(Json(match existing {
        Some(product) => BarcodeResponse {
            message: "Código de barras já existe".to_string(),
            available: false,
            product: Some(ProductRef {
                id: product.id,
                name: product.name,
                barcode: product.barcode,
            }),
        },
        None => BarcodeResponse {
            message: "Código de barras disponível".to_string(),
            available: true,
            product: None,
        },
    }))
}

/**
 * In-Memory Product Store
 *
 * Companion to the in-memory account store. Enforces barcode uniqueness per
 * seller like the `products_seller_barcode_key` constraint.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::db::{StoreError, UniqueField};
use crate::backend::products::model::{Product, ProductDraft};
use crate::backend::products::store::{ProductStore, Result};

#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn barcode_taken(products: &HashMap<Uuid, Product>, seller_id: Uuid, barcode: &str, except: Option<Uuid>) -> bool {
    products
        .values()
        .any(|p| p.seller_id == seller_id && p.barcode == barcode && Some(p.id) != except)
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, seller_id: Uuid, draft: ProductDraft) -> Result<Product> {
        let mut products = self.products.write().await;
        if barcode_taken(&products, seller_id, &draft.barcode, None) {
            return Err(StoreError::Conflict(UniqueField::Barcode));
        }
        let product = draft.into_product(Uuid::new_v4(), seller_id, Utc::now());
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list(&self, seller_id: Uuid) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut owned: Vec<Product> = products
            .values()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find(&self, seller_id: Uuid, id: Uuid) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| p.seller_id == seller_id).cloned())
    }

    async fn find_by_barcode(&self, seller_id: Uuid, barcode: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .find(|p| p.seller_id == seller_id && p.barcode == barcode)
            .cloned())
    }

    async fn replace(&self, seller_id: Uuid, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        if barcode_taken(&products, seller_id, &draft.barcode, Some(id)) {
            return Err(StoreError::Conflict(UniqueField::Barcode));
        }
        let Some(existing) = products.get_mut(&id).filter(|p| p.seller_id == seller_id) else {
            return Ok(None);
        };
        let replaced = Product {
            rating: existing.rating,
            review_count: existing.review_count,
            created_at: existing.created_at,
            ..draft.into_product(id, seller_id, Utc::now())
        };
        *existing = replaced.clone();
        Ok(Some(replaced))
    }

    async fn delete(&self, seller_id: Uuid, id: Uuid) -> Result<bool> {
        let mut products = self.products.write().await;
        if products.get(&id).is_some_and(|p| p.seller_id == seller_id) {
            products.remove(&id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/**
 * Product Persistence
 *
 * `ProductStore` scopes every operation to one seller: a product id that
 * belongs to another seller behaves exactly like an unknown id.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::db::StoreError;
use crate::backend::products::model::{Product, ProductDraft};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Seller-scoped product persistence
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// # Errors
    ///
    /// `StoreError::Conflict(Barcode)` if the seller already has the barcode.
    async fn create(&self, seller_id: Uuid, draft: ProductDraft) -> Result<Product>;

    /// The seller's products, newest first
    async fn list(&self, seller_id: Uuid) -> Result<Vec<Product>>;

    async fn find(&self, seller_id: Uuid, id: Uuid) -> Result<Option<Product>>;

    async fn find_by_barcode(&self, seller_id: Uuid, barcode: &str) -> Result<Option<Product>>;

    /// Replace every editable field; `None` if the seller has no such product
    async fn replace(&self, seller_id: Uuid, id: Uuid, draft: ProductDraft) -> Result<Option<Product>>;

    /// Returns whether a product was deleted
    async fn delete(&self, seller_id: Uuid, id: Uuid) -> Result<bool>;
}

const PRODUCT_COLUMNS: &str = "id, seller_id, name, description, price, category, barcode, stock, \
     is_sold_by_weight, price_per_kg, image_url, is_available, rating, review_count, created_at, updated_at";

/// Postgres product store
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, seller_id: Uuid, draft: ProductDraft) -> Result<Product> {
        let sql = format!(
            r#"
            INSERT INTO products (id, seller_id, name, description, price, category, barcode, stock,
                                  is_sold_by_weight, price_per_kg, image_url, is_available,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(Uuid::new_v4())
            .bind(seller_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(&draft.category)
            .bind(&draft.barcode)
            .bind(draft.stock)
            .bind(draft.is_sold_by_weight)
            .bind(draft.price_per_kg)
            .bind(&draft.image_url)
            .bind(draft.is_available)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    async fn list(&self, seller_id: Uuid) -> Result<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = $1 ORDER BY created_at DESC");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find(&self, seller_id: Uuid, id: Uuid) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND seller_id = $2");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(seller_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn find_by_barcode(&self, seller_id: Uuid, barcode: &str) -> Result<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = $1 AND seller_id = $2");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(barcode)
            .bind(seller_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn replace(&self, seller_id: Uuid, id: Uuid, draft: ProductDraft) -> Result<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = $3, description = $4, price = $5, category = $6, barcode = $7, stock = $8,
                is_sold_by_weight = $9, price_per_kg = $10, image_url = $11, is_available = $12,
                updated_at = $13
            WHERE id = $1 AND seller_id = $2
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(seller_id)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(&draft.category)
            .bind(&draft.barcode)
            .bind(draft.stock)
            .bind(draft.is_sold_by_weight)
            .bind(draft.price_per_kg)
            .bind(&draft.image_url)
            .bind(draft.is_available)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn delete(&self, seller_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND seller_id = $2")
            .bind(id)
            .bind(seller_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

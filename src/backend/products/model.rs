/**
 * Product Model
 *
 * Seller catalog entries, the validated payload used to create or replace
 * one, and the request body it is validated from.
 */

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{SharedError, Validator};

/// A product owned by one seller
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub barcode: String,
    pub stock: i32,
    pub is_sold_by_weight: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_per_kg: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated product fields
///
/// For products sold by weight, `price` and `stock` are zero and
/// `price_per_kg` carries the price; otherwise `price_per_kg` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub barcode: String,
    pub stock: i32,
    pub is_sold_by_weight: bool,
    pub price_per_kg: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl ProductDraft {
    /// Materialize as a new product of `seller_id`
    pub fn into_product(self, id: Uuid, seller_id: Uuid, now: DateTime<Utc>) -> Product {
        Product {
            id,
            seller_id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            barcode: self.barcode,
            stock: self.stock,
            is_sold_by_weight: self.is_sold_by_weight,
            price_per_kg: self.price_per_kg,
            image_url: self.image_url,
            is_available: self.is_available,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create/replace request body
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub stock: Option<i64>,
    pub is_sold_by_weight: Option<bool>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_per_kg: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

fn is_web_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

impl ProductRequest {
    pub fn validate(&self) -> Result<ProductDraft, SharedError> {
        let mut v = Validator::new();

        let name = v.required("name", self.name.as_deref(), "Nome do produto é obrigatório");
        if let Some(name) = &name {
            v.length("name", name, 2, 100, "Nome deve ter entre 2 e 100 caracteres");
        }
        let description = v.required("description", self.description.as_deref(), "Descrição é obrigatória");
        if let Some(description) = &description {
            v.length(
                "description",
                description,
                10,
                500,
                "Descrição deve ter entre 10 e 500 caracteres",
            );
        }

        let price = self.price.filter(|p| !p.is_sign_negative());
        v.check(price.is_some(), "price", "Preço deve ser um número positivo");

        let category = v.required("category", self.category.as_deref(), "Categoria é obrigatória");
        let barcode = v.required("barcode", self.barcode.as_deref(), "Código de barras é obrigatório");

        let stock = self
            .stock
            .filter(|s| *s >= 0)
            .and_then(|s| i32::try_from(s).ok());
        v.check(stock.is_some(), "stock", "Estoque deve ser um número inteiro positivo");

        v.check(
            self.is_sold_by_weight.is_some(),
            "isSoldByWeight",
            "isSoldByWeight deve ser um booleano",
        );

        v.check(
            self.price_per_kg.map_or(true, |p| !p.is_sign_negative()),
            "pricePerKg",
            "Preço por kg deve ser um número positivo",
        );

        let image_url = v.optional(self.image_url.as_deref());
        if let Some(url) = &image_url {
            v.check(is_web_url(url), "imageUrl", "URL da imagem deve ser válida");
        }

        v.finish()?;

        match (name, description, price, category, barcode, stock, self.is_sold_by_weight) {
            (Some(name), Some(description), Some(price), Some(category), Some(barcode), Some(stock), Some(by_weight)) => {
                Ok(ProductDraft {
                    name,
                    description,
                    price: if by_weight { Decimal::ZERO } else { price },
                    category,
                    barcode,
                    stock: if by_weight { 0 } else { stock },
                    is_sold_by_weight: by_weight,
                    price_per_kg: if by_weight { self.price_per_kg } else { None },
                    image_url,
                    is_available: self.is_available.unwrap_or(true),
                })
            }
            _ => Err(SharedError::validation("name", "Nome do produto é obrigatório")),
        }
    }
}

//! Product Aggregate and the in-memory catalog

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use validator::Validate;

use crate::domain::value_objects::{Price, PriceError};
use crate::{EcommerceError, Result};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/250x250?text=";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub description: String,
    pub sold: bool,
}

/// Admin payload for create and update. `price` stays raw JSON until parsed into a [`Price`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<Value>,
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sold: Option<bool>,
}

/// A [`ProductInput`] whose required fields are present.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub image: Option<String>,
    pub description: String,
    pub sold: bool,
}

impl ProductInput {
    pub fn into_draft(self) -> Result<ProductDraft> {
        self.validate().map_err(|_| EcommerceError::MissingFields)?;
        let price = Price::try_from(self.price.as_ref().unwrap_or(&Value::Null)).map_err(|e| match e {
            PriceError::Zero => EcommerceError::MissingFields,
            PriceError::NotANumber => EcommerceError::InvalidPrice,
        })?;
        Ok(ProductDraft {
            name: self.name.unwrap_or_default(),
            price,
            category: self.category.unwrap_or_default(),
            image: self.image.filter(|i| !i.is_empty()),
            description: self.description.unwrap_or_default(),
            sold: self.sold.unwrap_or(false),
        })
    }
}

impl Product {
    pub fn create(id: i64, draft: ProductDraft) -> Self {
        let image = draft.image.unwrap_or_else(|| placeholder_image(&draft.name));
        Self { id, name: draft.name, price: draft.price.value(), category: draft.category, image, description: draft.description, sold: false }
    }

    /// Full overwrite; only the image survives, and only when the draft carries none.
    pub fn replace(&mut self, draft: ProductDraft) {
        let image = draft.image.unwrap_or_else(|| std::mem::take(&mut self.image));
        *self = Self { id: self.id, name: draft.name, price: draft.price.value(), category: draft.category, image, description: draft.description, sold: draft.sold };
    }

    pub fn toggle_sold(&mut self) -> bool { self.sold = !self.sold; self.sold }
}

pub fn placeholder_image(name: &str) -> String { format!("{PLACEHOLDER_IMAGE}{}", name.replace(' ', "+")) }

fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: 1, name: "Running Shoes".into(), price: 89.99, category: "sports".into(),
            image: placeholder_image("Running Shoes"), description: "Lightweight running shoes for maximum comfort".into(), sold: false,
        },
        Product {
            id: 2, name: "Casual Sneakers".into(), price: 59.99, category: "casual".into(),
            image: placeholder_image("Casual Sneakers"), description: "Stylish casual sneakers for everyday wear".into(), sold: false,
        },
    ]
}

/// Ordered product collection shared by every request.
#[derive(Clone, Debug, Default)]
pub struct Catalog { products: Arc<RwLock<Vec<Product>>> }

impl Catalog {
    pub fn seeded() -> Self { Self { products: Arc::new(RwLock::new(default_products())) } }

    /// All products in insertion order, reseeding the defaults if the catalog ran empty.
    pub async fn list(&self) -> Vec<Product> {
        {
            let products = self.products.read().await;
            if !products.is_empty() { return products.clone(); }
        }
        let mut products = self.products.write().await;
        if products.is_empty() {
            tracing::info!("catalog empty, seeding default products");
            *products = default_products();
        }
        products.clone()
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.products.read().await.iter().find(|p| p.id == id).cloned().ok_or(EcommerceError::ProductNotFound)
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let draft = input.into_draft()?;
        let product = Product::create(Utc::now().timestamp_millis(), draft);
        self.products.write().await.push(product.clone());
        tracing::info!(product_id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: i64, input: ProductInput) -> Result<Product> {
        let draft = input.into_draft()?;
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == id).ok_or(EcommerceError::ProductNotFound)?;
        product.replace(draft);
        tracing::info!(product_id = id, "product updated");
        Ok(product.clone())
    }

    /// Removes every product with `id`; returns how many were dropped.
    pub async fn delete(&self, id: i64) -> usize {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = before - products.len();
        tracing::info!(product_id = id, removed, "product deleted");
        removed
    }

    pub async fn toggle_sold(&self, id: i64) -> Result<bool> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == id).ok_or(EcommerceError::ProductNotFound)?;
        Ok(product.toggle_sold())
    }
}

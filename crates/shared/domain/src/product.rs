//! Product domain entity and the store-joined product view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Store;

/// An item sold by exactly one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Unique product identifier
    pub id: i32,
    /// Owning store
    pub store_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Product row joined with a summary of its store, as listed on a store page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StoreProduct {
    #[serde(flatten)]
    pub product: Product,
    pub store_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub store_category: Option<String>,
    pub store_rating: Option<f64>,
}

impl StoreProduct {
    /// Attach the owning store's summary fields to a product.
    pub fn new(product: Product, store: &Store) -> Self {
        Self {
            product,
            store_name: store.name.clone(),
            latitude: store.latitude,
            longitude: store.longitude,
            store_category: store.category.clone(),
            store_rating: store.rating,
        }
    }
}

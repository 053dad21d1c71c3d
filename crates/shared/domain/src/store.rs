//! Store domain entity.

use serde::{Deserialize, Serialize};

/// A merchant that owns zero or more products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Store {
    /// Unique store identifier
    pub id: i32,
    /// Display name
    pub name: String,
    pub description: Option<String>,
    /// Store category (e.g. "Restaurant", "Bookstore")
    pub category: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Average customer rating
    pub rating: Option<f64>,
}

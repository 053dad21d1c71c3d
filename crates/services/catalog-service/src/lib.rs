//! Catalog Service Library
//!
//! Read access to stores and products, including the two-phase product
//! search that groups matching products under their stores.

pub mod repository;
pub mod search;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use repository::{CatalogRepository, CatalogStore};
pub use search::ProductSearch;
pub use service::{CatalogManager, CatalogService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service::MockCatalogService;

/// Build the catalog service on top of a database connection.
pub fn build_service(db: DatabaseConnection) -> Arc<dyn CatalogService> {
    let repo: Arc<dyn CatalogRepository> = Arc::new(CatalogStore::new(db));
    Arc::new(CatalogManager::new(repo))
}

//! Business logic layer.

mod catalog_service;

pub use catalog_service::{CatalogManager, CatalogService};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;

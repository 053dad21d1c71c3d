//! Repository layer for data access.

mod catalog_repository;
pub mod entities;

pub use catalog_repository::{CatalogRepository, CatalogStore};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;

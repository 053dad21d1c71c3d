//! Catalog service - store browsing, product lookup and search.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{Product, SearchQuery, SearchResult, Store, StoreProduct, SUGGESTION_LIMIT};

use crate::repository::CatalogRepository;
use crate::search::ProductSearch;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Verify the catalog database is reachable
    async fn health_check(&self) -> AppResult<()>;

    /// List all stores
    async fn list_stores(&self) -> AppResult<Vec<Store>>;

    /// Get store by ID
    async fn get_store(&self, id: i32) -> AppResult<Store>;

    /// Get the stores with the given IDs (unknown IDs are skipped)
    async fn stores_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Store>>;

    /// List a store's products with store summary fields
    async fn store_products(&self, store_id: i32) -> AppResult<Vec<StoreProduct>>;

    /// Get product by ID
    async fn get_product(&self, id: i32) -> AppResult<Product>;

    /// A handful of random product names for the search box
    async fn product_suggestions(&self) -> AppResult<Vec<String>>;

    /// Distinct product categories
    async fn product_categories(&self) -> AppResult<Vec<String>>;

    /// Search stores by their products from a raw `query` parameter
    async fn search_products(&self, query: Option<String>) -> AppResult<Vec<SearchResult>>;
}

/// Concrete implementation of CatalogService using repository.
pub struct CatalogManager {
    repo: Arc<dyn CatalogRepository>,
    search: ProductSearch,
}

impl CatalogManager {
    /// Create new catalog service instance with repository
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            search: ProductSearch::new(repo.clone()),
            repo,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn health_check(&self) -> AppResult<()> {
        self.repo.ping().await
    }

    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        self.repo.list_stores().await
    }

    async fn get_store(&self, id: i32) -> AppResult<Store> {
        self.repo.find_store(id).await?.ok_or_not_found("Store")
    }

    async fn stores_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Store>> {
        self.repo.find_stores_by_ids(ids).await
    }

    async fn store_products(&self, store_id: i32) -> AppResult<Vec<StoreProduct>> {
        let products = self.repo.list_store_products(store_id).await?;
        tracing::debug!(store_id, count = products.len(), "Fetched store products");
        Ok(products)
    }

    async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.repo.find_product(id).await?.ok_or_not_found("Product")
    }

    async fn product_suggestions(&self) -> AppResult<Vec<String>> {
        self.repo.random_product_names(SUGGESTION_LIMIT).await
    }

    async fn product_categories(&self) -> AppResult<Vec<String>> {
        self.repo.product_categories().await
    }

    async fn search_products(&self, query: Option<String>) -> AppResult<Vec<SearchResult>> {
        let query = SearchQuery::parse(query.as_deref())?;
        self.search.search(&query).await
    }
}

//! Two-phase product search.
//!
//! Phase 1 looks for the whole clean query as a substring of a product's
//! name, description or category. Only when that succeeds with no stores,
//! phase 2 splits the query into words and accepts a product matching any
//! word in any field. Both phases group matching products under their store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use common::AppResult;
use domain::{shape_results, SearchQuery, SearchResult, MAX_SEARCH_WORDS};

use crate::repository::CatalogRepository;

/// Search aggregator over the catalog repository.
pub struct ProductSearch {
    repo: Arc<dyn CatalogRepository>,
}

impl ProductSearch {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Run the search for a normalized query.
    ///
    /// Repository failures are returned as-is; a failed phase 1 never
    /// falls through to phase 2.
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
        let exact = self.run_phase(vec![query.exact_pattern()]).await?;
        if !exact.is_empty() {
            info!(query = %query, stores = exact.len(), "Exact product search matched");
            return Ok(exact);
        }

        let word_count = query.words().count();
        if word_count > MAX_SEARCH_WORDS {
            warn!(
                query = %query,
                words = word_count,
                limit = MAX_SEARCH_WORDS,
                "Search query has too many words, extra words ignored"
            );
        }

        let patterns = query.word_patterns();
        debug!(?patterns, "No exact match, trying word search");

        let flexible = self.run_phase(patterns).await?;
        info!(query = %query, stores = flexible.len(), "Word product search finished");

        Ok(flexible)
    }

    async fn run_phase(&self, patterns: Vec<String>) -> AppResult<Vec<SearchResult>> {
        let rows = self.repo.find_stores_with_matching_products(patterns).await?;

        let mut results = shape_results(rows);
        results.retain(|result| !result.products.is_empty());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use chrono::Utc;
    use mockall::predicate::eq;

    use common::AppError;
    use domain::{Product, Store, StoreMatch};

    use crate::repository::MockCatalogRepository;

    fn store(id: i32) -> Store {
        Store {
            id,
            name: format!("Store {}", id),
            description: None,
            category: Some("Food".to_string()),
            address: None,
            phone: None,
            image_url: None,
            latitude: None,
            longitude: None,
            rating: None,
        }
    }

    fn product(id: i32, store_id: i32, name: &str) -> Product {
        Product {
            id,
            store_id,
            name: name.to_string(),
            description: None,
            price: 25.0,
            category: None,
            image_url: None,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    fn query(raw: &str) -> SearchQuery {
        SearchQuery::parse(Some(raw)).unwrap()
    }

    #[tokio::test]
    async fn test_exact_match_skips_word_phase() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_stores_with_matching_products()
            .with(eq(vec!["%pizza%".to_string()]))
            .times(1)
            .returning(|_| {
                Ok(vec![StoreMatch {
                    store: store(1),
                    matching_products: Some(vec![product(10, 1, "Pizza Margherita")]),
                }])
            });

        let search = ProductSearch::new(Arc::new(repo));
        let results = search.search(&query("pizza")).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].store.id, 1);
        let names: Vec<&str> = results[0].products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza Margherita"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_word_patterns() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_stores_with_matching_products()
            .with(eq(vec!["%choco late%".to_string()]))
            .times(1)
            .returning(|_| Ok(vec![]));
        repo.expect_find_stores_with_matching_products()
            .with(eq(vec!["%choco%".to_string(), "%late%".to_string()]))
            .times(1)
            .returning(|_| {
                Ok(vec![StoreMatch {
                    store: store(2),
                    matching_products: Some(vec![product(20, 2, "Chocolate Cake")]),
                }])
            });

        let search = ProductSearch::new(Arc::new(repo));
        let results = search.search(&query("choco+late")).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].store.id, 2);
        assert_eq!(results[0].products[0].name, "Chocolate Cake");
    }

    #[tokio::test]
    async fn test_no_match_in_either_phase_is_empty() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_stores_with_matching_products()
            .times(2)
            .returning(|_| Ok(vec![]));

        let search = ProductSearch::new(Arc::new(repo));
        let results = search.search(&query("unicorn steak")).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_phase_one_failure_is_not_retried() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_stores_with_matching_products()
            .times(1)
            .returning(|_| Err(AppError::internal("connection reset")));

        let search = ProductSearch::new(Arc::new(repo));
        let result = search.search(&query("pizza")).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_results_are_unique_per_store_and_never_empty() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_stores_with_matching_products()
            .times(1)
            .returning(|_| {
                Ok(vec![
                    StoreMatch {
                        store: store(1),
                        matching_products: Some(vec![product(10, 1, "Tea")]),
                    },
                    StoreMatch {
                        store: store(3),
                        matching_products: None,
                    },
                    StoreMatch {
                        store: store(1),
                        matching_products: Some(vec![product(11, 1, "Iced Tea")]),
                    },
                ])
            });

        let search = ProductSearch::new(Arc::new(repo));
        let results = search.search(&query("tea")).await.unwrap();

        let ids: Vec<i32> = results.iter().map(SearchResult::store_id).collect();
        let unique: HashSet<i32> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids, vec![1]);
        assert!(results.iter().all(|r| !r.products.is_empty()));
        assert_eq!(results[0].products.len(), 2);
    }

    #[tokio::test]
    async fn test_word_phase_uses_capped_pattern_list() {
        let raw = (0..MAX_SEARCH_WORDS + 3)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut repo = MockCatalogRepository::new();
        let mut phase = 0;
        repo.expect_find_stores_with_matching_products()
            .times(2)
            .returning(move |patterns| {
                phase += 1;
                if phase == 2 {
                    assert_eq!(patterns.len(), MAX_SEARCH_WORDS);
                }
                Ok(vec![])
            });

        let search = ProductSearch::new(Arc::new(repo));
        let results = search.search(&query(&raw)).await.unwrap();

        assert!(results.is_empty());
    }
}

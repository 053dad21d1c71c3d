//! Product search values: the normalized query, per-store rows returned by
//! storage, and the nested result shape returned to clients.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SEARCH_WORDS;
use crate::error::{DomainError, DomainResult};
use crate::product::Product;
use crate::store::Store;

const QUERY_REQUIRED: &str = "Search query is required";

/// A normalized, non-empty search query.
///
/// Built from the raw `query` parameter by percent-decoding it, turning
/// literal `+` into spaces and trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize a raw query parameter.
    ///
    /// Fails with a validation error when the parameter is missing or
    /// nothing is left after normalization.
    pub fn parse(raw: Option<&str>) -> DomainResult<Self> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(DomainError::validation(QUERY_REQUIRED)),
        };

        let decoded = urlencoding::decode(raw)
            .map_err(|_| DomainError::validation("Search query must be valid UTF-8"))?;
        let clean = decoded.replace('+', " ");
        let clean = clean.trim();

        if clean.is_empty() {
            return Err(DomainError::validation(QUERY_REQUIRED));
        }

        Ok(Self(clean.to_string()))
    }

    /// The clean query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wildcard pattern matching the whole clean query as a substring.
    pub fn exact_pattern(&self) -> String {
        format!("%{}%", self.0)
    }

    /// Whitespace-separated words of the clean query.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// One wildcard pattern per word, capped at [`MAX_SEARCH_WORDS`].
    pub fn word_patterns(&self) -> Vec<String> {
        self.words()
            .take(MAX_SEARCH_WORDS)
            .map(|word| format!("%{}%", word))
            .collect()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A store row as produced by storage, with its aggregated matching products.
///
/// `matching_products` is `None` when the storage layer produced no aggregate
/// for the row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreMatch {
    pub store: Store,
    pub matching_products: Option<Vec<Product>>,
}

/// A store together with the products that matched a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResult {
    #[serde(flatten)]
    pub store: Store,
    /// Matching products, never absent
    pub products: Vec<Product>,
}

impl SearchResult {
    pub fn store_id(&self) -> i32 {
        self.store.id
    }
}

/// Convert storage rows into search results.
///
/// Every result carries a `products` list (empty when the row had no
/// aggregate). Rows repeating a store id are merged into the first
/// occurrence, so each store appears once, in first-seen order.
pub fn shape_results(rows: Vec<StoreMatch>) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = Vec::with_capacity(rows.len());
    let mut index: HashMap<i32, usize> = HashMap::with_capacity(rows.len());

    for row in rows {
        let products = row.matching_products.unwrap_or_default();

        match index.get(&row.store.id) {
            Some(&position) => {
                let existing = &mut results[position].products;
                for product in products {
                    if !existing.iter().any(|p| p.id == product.id) {
                        existing.push(product);
                    }
                }
            }
            None => {
                index.insert(row.store.id, results.len());
                results.push(SearchResult {
                    store: row.store,
                    products,
                });
            }
        }
    }

    results
}

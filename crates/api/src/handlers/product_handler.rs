//! Product lookup and search handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;
use domain::{Product, SearchResult};

use crate::state::AppState;

/// Search query string
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text search over product name, description and category
    #[param(example = "chocolate cake")]
    pub query: Option<String>,
}

/// Create `/api/products` routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/suggestions", get(suggestions))
        .route("/categories", get(categories))
        .route("/search", get(search))
        .route("/:product_id", get(get_product))
}

/// Random product names for the search box
#[utoipa::path(
    get,
    path = "/api/products/suggestions",
    tag = "Products",
    responses(
        (status = 200, description = "Up to five distinct product names", body = Vec<String>)
    )
)]
pub async fn suggestions(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let names = state.catalog.product_suggestions().await?;
    Ok(Json(names))
}

/// Distinct product categories
#[utoipa::path(
    get,
    path = "/api/products/categories",
    tag = "Products",
    responses(
        (status = 200, description = "Product categories", body = Vec<String>)
    )
)]
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let categories = state.catalog.product_categories().await?;
    Ok(Json(categories))
}

/// Search stores by the products they sell
///
/// Tries the whole query as one phrase first, then falls back to matching
/// any single word. Results are grouped per store.
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Products",
    params(SearchParams),
    responses(
        (status = 200, description = "Stores with their matching products", body = Vec<SearchResult>),
        (status = 400, description = "Search query is required")
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let results = state.catalog.search_products(params.query).await?;
    Ok(Json(results))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_product(product_id).await?;
    Ok(Json(product))
}

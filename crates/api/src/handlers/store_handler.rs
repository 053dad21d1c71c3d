//! Store browsing and favorites handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Store, StoreProduct};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Add/remove favorite request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FavoriteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and storeId are required"))]
    #[schema(example = "mona@example.com")]
    pub email: String,
    #[serde(rename = "storeId")]
    #[validate(required(message = "Email and storeId are required"))]
    #[schema(example = 3)]
    pub store_id: Option<i32>,
}

impl FavoriteRequest {
    fn store_id(&self) -> AppResult<i32> {
        self.store_id
            .ok_or_else(|| AppError::validation("Email and storeId are required"))
    }
}

/// Favorites after adding a store
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteAdded {
    pub message: String,
    pub favorite_stores: Vec<i32>,
    pub store: Store,
}

/// Favorites after removing a store
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteRemoved {
    pub message: String,
    pub favorite_stores: Vec<i32>,
}

/// Create `/api/stores` routes
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores))
        .route("/:id", get(get_store))
        .route("/:id/products", get(list_store_products))
        .route("/favorite/add", post(add_favorite))
        .route("/favorite/remove", post(remove_favorite))
}

/// List all stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "All stores", body = Vec<Store>)
    )
)]
pub async fn list_stores(State(state): State<AppState>) -> AppResult<Json<Vec<Store>>> {
    let stores = state.catalog.list_stores().await?;
    Ok(Json(stores))
}

/// Get store by ID
#[utoipa::path(
    get,
    path = "/api/stores/{id}",
    tag = "Stores",
    params(
        ("id" = i32, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store details", body = Store),
        (status = 404, description = "Store not found")
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Store>> {
    let store = state.catalog.get_store(id).await?;
    Ok(Json(store))
}

/// List a store's products ordered by name
#[utoipa::path(
    get,
    path = "/api/stores/{id}/products",
    tag = "Stores",
    params(
        ("id" = i32, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Products with store summary", body = Vec<StoreProduct>)
    )
)]
pub async fn list_store_products(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<StoreProduct>>> {
    let products = state.catalog.store_products(id).await?;
    Ok(Json(products))
}

/// Add a store to a user's favorites
#[utoipa::path(
    post,
    path = "/api/stores/favorite/add",
    tag = "Stores",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Store added to favorites", body = FavoriteAdded),
        (status = 400, description = "Missing fields or already a favorite"),
        (status = 404, description = "User or store not found")
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FavoriteRequest>,
) -> AppResult<Json<FavoriteAdded>> {
    let store_id = payload.store_id()?;

    // Unknown users are reported before unknown stores.
    state.users.get_user_by_email(&payload.email).await?;
    let store = state.catalog.get_store(store_id).await?;

    let favorite_stores = state.users.add_favorite(&payload.email, store_id).await?;

    Ok(Json(FavoriteAdded {
        message: "Store added to favorites".to_string(),
        favorite_stores,
        store,
    }))
}

/// Remove a store from a user's favorites
#[utoipa::path(
    post,
    path = "/api/stores/favorite/remove",
    tag = "Stores",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Store removed from favorites", body = FavoriteRemoved),
        (status = 400, description = "Missing fields or not a favorite"),
        (status = 404, description = "User not found")
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FavoriteRequest>,
) -> AppResult<Json<FavoriteRemoved>> {
    let store_id = payload.store_id()?;
    let favorite_stores = state.users.remove_favorite(&payload.email, store_id).await?;

    Ok(Json(FavoriteRemoved {
        message: "Store removed from favorites".to_string(),
        favorite_stores,
    }))
}

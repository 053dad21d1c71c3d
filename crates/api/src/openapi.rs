//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{LoginRequest, SignupRequest, UserEnvelope};
use crate::handlers::health_handler::{HealthResponse, MessageResponse, ServiceHealth, ServiceStatus};
use crate::handlers::store_handler::{FavoriteAdded, FavoriteRemoved, FavoriteRequest};
use crate::handlers::user_handler::UpdateUserForm;
use domain::{Product, SearchResult, Store, StoreProduct, UserProfile, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::root,
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::signup,
        crate::handlers::auth_handler::login,
        crate::handlers::user_handler::get_profile,
        crate::handlers::user_handler::list_favorites,
        crate::handlers::user_handler::update_user,
        crate::handlers::store_handler::list_stores,
        crate::handlers::store_handler::get_store,
        crate::handlers::store_handler::list_store_products,
        crate::handlers::store_handler::add_favorite,
        crate::handlers::store_handler::remove_favorite,
        crate::handlers::product_handler::suggestions,
        crate::handlers::product_handler::categories,
        crate::handlers::product_handler::search,
        crate::handlers::product_handler::get_product,
    ),
    components(
        schemas(
            MessageResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
            SignupRequest,
            LoginRequest,
            UserEnvelope,
            UpdateUserForm,
            UserResponse,
            UserProfile,
            FavoriteRequest,
            FavoriteAdded,
            FavoriteRemoved,
            Store,
            Product,
            StoreProduct,
            SearchResult,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and dependency checks"),
        (name = "Accounts", description = "Student signup and login"),
        (name = "Users", description = "Profiles and favorite stores"),
        (name = "Stores", description = "Store browsing and favorites"),
        (name = "Products", description = "Product lookup and search"),
    )
)]
pub struct ApiDoc;

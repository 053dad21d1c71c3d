//! Route configuration.

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use domain::UPLOADS_URL_PREFIX;

use crate::handlers::{
    auth_routes, health_routes, product_routes, profile_update_routes, store_routes, user_routes,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Room for the text fields around the uploaded file.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.uploads.max_bytes() + FORM_OVERHEAD_BYTES;
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(profile_update_routes(body_limit))
        .nest("/api/users", user_routes())
        .nest("/api/stores", store_routes())
        .nest("/api/products", product_routes())
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

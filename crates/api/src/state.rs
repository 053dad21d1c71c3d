//! Application state for dependency injection.

use std::sync::Arc;

use catalog_service_lib::CatalogService;
use user_service_lib::UserService;

use crate::uploads::UploadStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub users: Arc<dyn UserService>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        users: Arc<dyn UserService>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            catalog,
            users,
            uploads: Arc::new(uploads),
        }
    }
}

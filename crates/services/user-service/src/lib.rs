//! User Service Library
//!
//! Student accounts: signup, login, profile updates and favorite stores.

pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use repository::{UserRepository, UserStore};
pub use service::{ProfileUpdate, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service::MockUserService;

/// Build the user service on top of a database connection.
pub fn build_service(db: DatabaseConnection) -> Arc<dyn UserService> {
    let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db));
    Arc::new(UserManager::new(repo))
}

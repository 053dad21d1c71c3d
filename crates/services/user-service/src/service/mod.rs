//! Business logic layer.

mod user_service;

pub use user_service::{ProfileUpdate, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;

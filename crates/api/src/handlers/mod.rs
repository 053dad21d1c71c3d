//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod product_handler;
pub mod store_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use product_handler::product_routes;
pub use store_handler::store_routes;
pub use user_handler::{profile_update_routes, user_routes};

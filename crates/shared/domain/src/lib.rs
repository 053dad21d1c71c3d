//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the catalog and user services and the HTTP API.

pub mod constants;
pub mod error;
pub mod product;
pub mod search;
pub mod store;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use product::{Product, StoreProduct};
pub use search::{shape_results, SearchQuery, SearchResult, StoreMatch};
pub use store::Store;
pub use user::{NewUser, User, UserChanges, UserProfile, UserResponse};

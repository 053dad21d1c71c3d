//! SeaORM entities for the catalog tables.

pub mod product;
pub mod store;

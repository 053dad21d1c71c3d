//! SeaORM entities for the account tables.

pub mod user;

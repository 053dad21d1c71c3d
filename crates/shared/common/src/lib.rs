//! Common utilities shared across the services and the HTTP API.
//!
//! This crate provides:
//! - Unified error handling with HTTP mapping
//! - Configuration structures
//! - The database connection wrapper (feature `database`)

pub mod config;
#[cfg(feature = "database")]
pub mod db;
pub mod error;

pub use config::*;
#[cfg(feature = "database")]
pub use db::Database;
pub use error::{AppError, AppResult, OptionExt};

//! API configuration.

use std::env;

use common::{DatabaseConfig, ServerConfig, UploadConfig};

/// API server configuration.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Bind address
    pub server: ServerConfig,
    /// PostgreSQL connection pool
    pub database: DatabaseConfig,
    /// Profile picture storage
    pub uploads: UploadConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT").unwrap_or(defaults.server.port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR").unwrap_or(defaults.uploads.dir),
                max_bytes: parse_var("MAX_UPLOAD_BYTES").unwrap_or(defaults.uploads.max_bytes),
            },
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

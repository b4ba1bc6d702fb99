use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

// Top-level configuration, assembled from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Prefix the events router is nested under, e.g. `/eventos` or `/api/eventos`.
    pub mount_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "3001", "port number")?,
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "sata_events=debug,tower_http=debug".to_string()),
                mount_path: normalize_mount_path(
                    &env::var("EVENTS_MOUNT_PATH").unwrap_or_else(|_| "/eventos".to_string()),
                ),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "mysql://root@localhost:3306/sata_events".to_string()),
                pool_size: parse_var("DB_POOL_SIZE", "5", "number")?,
                run_migrations: parse_var("RUN_MIGRATIONS", "true", "boolean")?,
            },
        })
    }
}

fn parse_var<T: FromStr>(
    key: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value, expected })
}

/// Ensures a leading slash and strips trailing ones; axum refuses to nest at `/`.
pub fn normalize_mount_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/eventos".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

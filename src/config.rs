use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use tracing::{info, warn};

use crate::errors::ServerError;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_PATH: &str = "hostel_finder.sqlite3";
pub const DEFAULT_SCHEMA_PATH: &str = "sql/schema.sql";
pub const DEFAULT_MAX_WORKERS: &str = "8";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    /// When set, listings come from this backend endpoint instead of the local table.
    pub catalog_url: Option<String>,
    /// When set, listings are loaded once from this JSON file.
    pub catalog_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_url = lookup("HOSTEL_CATALOG_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(url) = &catalog_url {
            url::Url::parse(url)
                .map_err(|e| ServerError::ConfigError(format!("HOSTEL_CATALOG_URL: {e}")))?;
        }

        let catalog_file = lookup("HOSTEL_CATALOG_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if catalog_url.is_some() && catalog_file.is_some() {
            return Err(ServerError::ConfigError(
                "set at most one of HOSTEL_CATALOG_URL and HOSTEL_CATALOG_FILE".into(),
            ));
        }

        let max_workers: usize = try_load(&lookup, "HOSTEL_MAX_WORKERS", DEFAULT_MAX_WORKERS)?;
        if max_workers == 0 {
            return Err(ServerError::ConfigError(
                "HOSTEL_MAX_WORKERS must be at least 1".into(),
            ));
        }

        Ok(Self {
            addr: try_load(&lookup, "HOSTEL_ADDR", DEFAULT_ADDR)?,
            db_path: try_load(&lookup, "HOSTEL_DB_PATH", DEFAULT_DB_PATH)?,
            schema_path: try_load(&lookup, "HOSTEL_SCHEMA_PATH", DEFAULT_SCHEMA_PATH)?,
            max_workers,
            catalog_url,
            catalog_file,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ServerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ServerError::ConfigError(format!("{key}: {e}"))
    })
}

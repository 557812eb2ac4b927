//! Configuration loading and representation.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `CATTERY_STORE` | `memory` | `memory`, `postgres` or `sqlite` |
//! | `DATABASE_URL` | none | required for `postgres`; `sqlite` defaults to in-memory |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{0}'")]
    InvalidBindAddr(String),

    #[error("unknown CATTERY_STORE '{0}' (expected memory, postgres or sqlite)")]
    UnknownStore(String),

    #[error("DATABASE_URL must be set when CATTERY_STORE={0}")]
    MissingDatabaseUrl(&'static str),
}

/// Which persistence gateway backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres { database_url: String },
    /// `None` means a private in-memory SQLite database.
    Sqlite { database_url: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (injectable for tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let store = match lookup("CATTERY_STORE")
            .unwrap_or_else(|| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" | "in-memory" => StoreConfig::InMemory,
            "postgres" => StoreConfig::Postgres {
                database_url: database_url.ok_or(ConfigError::MissingDatabaseUrl("postgres"))?,
            },
            "sqlite" => StoreConfig::Sqlite { database_url },
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self { bind_addr, store })
    }
}

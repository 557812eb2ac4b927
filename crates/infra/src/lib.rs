//! Infrastructure layer: persistence gateways and configuration.

pub mod cat_store;
pub mod config;

pub use cat_store::{
    CatGateway, InMemoryCatGateway, PostgresCatGateway, SqliteCatGateway, StorageError,
};
pub use config::{AppConfig, ConfigError, StoreConfig};

//! Cat persistence boundary.
//!
//! This module defines the storage-facing contract for cats together with an
//! in-memory implementation (tests/dev) and SQL-backed implementations.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StorageError` as follows:
//!
//! | SQLx Error | Backend code | StorageError |
//! |------------|--------------|--------------|
//! | Database (unique violation) | Postgres `23505`, SQLite `1555`/`2067` | `Duplicate` |
//! | Database (other) | any | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | n/a | `Backend` |
//! | ColumnDecode / Decode | n/a | `Corrupt` |

pub mod in_memory;
pub mod postgres;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryCatGateway;
pub use postgres::PostgresCatGateway;
pub use r#trait::{CatGateway, StorageError};
pub use sqlite::SqliteCatGateway;

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            if db_err.is_unique_violation() {
                StorageError::Duplicate(msg)
            } else {
                StorageError::Backend(msg)
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StorageError::Corrupt(format!("decode error in {}: {}", operation, err))
        }
        sqlx::Error::PoolClosed => {
            StorageError::Backend(format!("connection pool closed in {}", operation))
        }
        _ => StorageError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

//! SQLite-backed cat store.
//!
//! Same logical schema as the Postgres store; SQLite keeps `created_at` as
//! RFC 3339 text and `birth_date` as `YYYY-MM-DD` text. `list()` orders by
//! `rowid`, i.e. insertion order.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use cattery_core::{Cat, CatId};

use super::map_sqlx_error;
use super::r#trait::{CatGateway, StorageError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cats (
        id          TEXT PRIMARY KEY NOT NULL,
        user_id     TEXT NULL,
        created_at  TEXT NOT NULL,
        name        TEXT NOT NULL,
        birth_date  TEXT NOT NULL,
        breed       TEXT NOT NULL,
        color       TEXT NOT NULL
    )
"#;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Whether `database_url` names a database that lives only in memory.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Pool settings for `database_url`.
///
/// sqlx opens an in-memory URL as one named shared-cache database, and
/// SQLite frees that database as soon as its last connection closes. The
/// pool therefore keeps exactly one connection open for its whole life: no
/// idle reaping and no lifetime recycling. The single connection also
/// serializes writers, so shared-cache table locks never surface.
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
    }
}

/// SQLite-backed persistence gateway.
#[derive(Debug, Clone)]
pub struct SqliteCatGateway {
    pool: SqlitePool,
}

impl SqliteCatGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url`.
    ///
    /// In-memory URLs get the pinned pool from [`pool_options`].
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?
            .create_if_missing(true);

        let pool = pool_options(database_url)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let gateway = Self::new(pool);
        gateway.ensure_schema().await?;
        Ok(gateway)
    }

    /// A throwaway in-memory database with the schema already created.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::connect(IN_MEMORY_URL).await
    }

    /// Create the `cats` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    /// Underlying pool, for callers that need raw access (e.g. fixtures).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn cat_from_row(row: &SqliteRow) -> Result<Cat, StorageError> {
    let decode = |e: sqlx::Error| StorageError::Corrupt(e.to_string());

    let id: String = row.try_get("id").map_err(decode)?;
    let id: CatId = id
        .parse()
        .map_err(|e: cattery_core::DomainError| StorageError::Corrupt(e.to_string()))?;

    Ok(Cat {
        id,
        user_id: row.try_get::<Option<String>, _>("user_id").map_err(decode)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        date_of_birth: row.try_get::<NaiveDate, _>("birth_date").map_err(decode)?,
        breed: row.try_get("breed").map_err(decode)?,
        color: row.try_get("color").map_err(decode)?,
    })
}

#[async_trait]
impl CatGateway for SqliteCatGateway {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Cat>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, created_at, name, birth_date, breed, color
            FROM cats
            ORDER BY rowid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(cat_from_row).collect()
    }

    #[instrument(skip(self), fields(cat_id = %id), err)]
    async fn get_by_id(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, created_at, name, birth_date, breed, color
            FROM cats
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_by_id", e))?;

        row.as_ref().map(cat_from_row).transpose()
    }

    #[instrument(skip(self, cat), fields(cat_id = %cat.id), err)]
    async fn create(&self, cat: &Cat) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO cats (id, user_id, created_at, name, birth_date, breed, color)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(cat.id.to_string())
        .bind(cat.user_id.clone())
        .bind(cat.created_at)
        .bind(cat.name.clone())
        .bind(cat.date_of_birth)
        .bind(cat.breed.clone())
        .bind(cat.color.clone())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(cat_id = %id), err)]
    async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM cats WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(())
    }
}

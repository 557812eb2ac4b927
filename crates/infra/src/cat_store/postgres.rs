//! Postgres-backed cat store.
//!
//! ## Schema
//!
//! | Column | Type | Notes |
//! |--------|------|-------|
//! | `id` | `TEXT PRIMARY KEY` | canonical lowercase hyphenated UUID |
//! | `user_id` | `TEXT NULL` | reserved owner slot |
//! | `created_at` | `TIMESTAMPTZ` | microsecond precision |
//! | `name` | `TEXT` | |
//! | `birth_date` | `DATE` | |
//! | `breed` | `TEXT` | |
//! | `color` | `TEXT` | |
//! | `seq` | `BIGSERIAL` | insertion counter; `list()` orders by it, never read into `Cat` |
//!
//! ## Thread Safety
//!
//! `PostgresCatGateway` is `Send + Sync` and cheap to clone; concurrency
//! control is left to the pool and the database.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use cattery_core::{Cat, CatId};

use super::map_sqlx_error;
use super::r#trait::{CatGateway, StorageError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS cats (
        id          TEXT PRIMARY KEY,
        user_id     TEXT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        name        TEXT NOT NULL,
        birth_date  DATE NOT NULL,
        breed       TEXT NOT NULL,
        color       TEXT NOT NULL,
        seq         BIGSERIAL
    )
"#;

/// Tables created before `seq` existed pick it up here; existing rows are
/// numbered in physical order.
const ADD_SEQ_COLUMN: &str = "ALTER TABLE cats ADD COLUMN IF NOT EXISTS seq BIGSERIAL";

/// Postgres-backed persistence gateway.
#[derive(Debug, Clone)]
pub struct PostgresCatGateway {
    pool: PgPool,
}

impl PostgresCatGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a default pool.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `cats` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        sqlx::query(ADD_SEQ_COLUMN)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

fn cat_from_row(row: &PgRow) -> Result<Cat, StorageError> {
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
impl CatGateway for PostgresCatGateway {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Cat>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, created_at, name, birth_date, breed, color
            FROM cats
            ORDER BY seq ASC
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
            WHERE id = $1
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
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(cat.id.to_string())
        .bind(cat.user_id.as_deref())
        .bind(cat.created_at)
        .bind(&cat.name)
        .bind(cat.date_of_birth)
        .bind(&cat.breed)
        .bind(&cat.color)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(cat_id = %id), err)]
    async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(())
    }
}

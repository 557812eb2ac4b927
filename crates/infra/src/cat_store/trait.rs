use async_trait::async_trait;
use thiserror::Error;

use cattery_core::{Cat, CatId};
use std::sync::Arc;

/// Storage operation error.
///
/// These are **infrastructure faults** as opposed to absence, which every
/// lookup reports as `Ok(None)`.
///
/// ## Error Categories
///
/// - **Duplicate**: the backend rejected a write because the id already exists
/// - **Backend**: the backend was unreachable or failed the statement
/// - **Corrupt**: a stored row could not be decoded into a `Cat`
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("duplicate identifier: {0}")]
    Duplicate(String),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}

/// Persistence gateway for cats.
///
/// A pure translation layer between `Cat` and a storage representation. It
/// performs no validation and generates no identifiers; callers hand it fully
/// formed entities.
///
/// ## Ordering
///
/// `list()` returns insertion order on every backend: vector order in memory,
/// `rowid` in SQLite and a hidden `seq` column in PostgreSQL.
///
/// ## Implementation Requirements
///
/// Implementations must:
/// - be safe to share across request-handling tasks
/// - report a missing entity as `Ok(None)` / no-op, never as an error
/// - propagate a duplicate-id rejection from `create` instead of swallowing it
#[async_trait]
pub trait CatGateway: Send + Sync {
    /// All stored cats.
    async fn list(&self) -> Result<Vec<Cat>, StorageError>;

    /// Exact-match lookup.
    async fn get_by_id(&self, id: CatId) -> Result<Option<Cat>, StorageError>;

    /// Persist a fully-formed cat.
    async fn create(&self, cat: &Cat) -> Result<(), StorageError>;

    /// Remove the cat with `id`; a missing id is a no-op.
    async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError>;
}

#[async_trait]
impl<G> CatGateway for Arc<G>
where
    G: CatGateway + ?Sized,
{
    async fn list(&self) -> Result<Vec<Cat>, StorageError> {
        (**self).list().await
    }

    async fn get_by_id(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, cat: &Cat) -> Result<(), StorageError> {
        (**self).create(cat).await
    }

    async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError> {
        (**self).delete_by_id(id).await
    }
}

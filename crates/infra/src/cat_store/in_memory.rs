use std::sync::RwLock;

use async_trait::async_trait;

use cattery_core::{Cat, CatId};

use super::r#trait::{CatGateway, StorageError};

/// In-memory cat store.
///
/// Intended for tests/dev. Keeps insertion order; lookups are linear.
#[derive(Debug, Default)]
pub struct InMemoryCatGateway {
    cats: RwLock<Vec<Cat>>,
}

impl InMemoryCatGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl CatGateway for InMemoryCatGateway {
    async fn list(&self) -> Result<Vec<Cat>, StorageError> {
        let cats = self.cats.read().map_err(|_| poisoned())?;
        Ok(cats.clone())
    }

    async fn get_by_id(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
        let cats = self.cats.read().map_err(|_| poisoned())?;
        Ok(cats.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, cat: &Cat) -> Result<(), StorageError> {
        let mut cats = self.cats.write().map_err(|_| poisoned())?;
        if cats.iter().any(|c| c.id == cat.id) {
            return Err(StorageError::Duplicate(cat.id.to_string()));
        }
        cats.push(cat.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError> {
        let mut cats = self.cats.write().map_err(|_| poisoned())?;
        cats.retain(|c| c.id != id);
        Ok(())
    }
}

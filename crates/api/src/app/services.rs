//! Cat service and storage wiring.

use std::sync::Arc;

use cattery_core::{Cat, CatDto, CatId, Clock, IdGenerator, RandomIdGenerator, SystemClock};
use cattery_infra::{
    CatGateway, InMemoryCatGateway, PostgresCatGateway, SqliteCatGateway, StorageError,
    StoreConfig,
};

/// Business-rule layer between the router and the persistence gateway.
///
/// Assigns identifiers and creation timestamps; holds no entity state of its
/// own. Absence is returned as `None`, never as an error. Storage faults are
/// passed through untouched.
#[derive(Clone)]
pub struct CatService {
    gateway: Arc<dyn CatGateway>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl CatService {
    pub fn new(
        gateway: Arc<dyn CatGateway>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            gateway,
            clock,
            ids,
        }
    }

    /// Service over `gateway` using the wall clock and random UUIDs.
    pub fn with_system_defaults(gateway: Arc<dyn CatGateway>) -> Self {
        Self::new(gateway, Arc::new(SystemClock), Arc::new(RandomIdGenerator))
    }

    pub async fn list_cats(&self) -> Result<Vec<Cat>, StorageError> {
        self.gateway.list().await
    }

    pub async fn get_cat(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
        self.gateway.get_by_id(id).await
    }

    /// Create a cat from client input and return it with its assigned id and
    /// creation time.
    pub async fn add_cat(&self, input: CatDto) -> Result<Cat, StorageError> {
        let cat = Cat::from_input(self.ids.next(), self.clock.now(), input);
        self.gateway.create(&cat).await?;

        tracing::info!(cat_id = %cat.id, "cat created");
        Ok(cat)
    }

    /// Delete a cat, returning what was removed.
    ///
    /// Looks up first; when nothing exists the gateway is not asked to delete.
    pub async fn delete_cat(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
        let Some(cat) = self.gateway.get_by_id(id).await? else {
            return Ok(None);
        };

        self.gateway.delete_by_id(id).await?;

        tracing::info!(cat_id = %id, "cat deleted");
        Ok(Some(cat))
    }
}

/// Build the persistence gateway selected by configuration.
pub async fn build_gateway(store: &StoreConfig) -> Result<Arc<dyn CatGateway>, StorageError> {
    match store {
        StoreConfig::InMemory => {
            tracing::warn!("using in-memory cat store; data is lost on restart");
            Ok(Arc::new(InMemoryCatGateway::new()))
        }
        StoreConfig::Postgres { database_url } => {
            let gateway = PostgresCatGateway::connect(database_url).await?;
            gateway.ensure_schema().await?;
            tracing::info!("using postgres cat store");
            Ok(Arc::new(gateway))
        }
        StoreConfig::Sqlite {
            database_url: Some(url),
        } => {
            let gateway = SqliteCatGateway::connect(url).await?;
            tracing::info!("using sqlite cat store");
            Ok(Arc::new(gateway))
        }
        StoreConfig::Sqlite { database_url: None } => {
            tracing::warn!("using in-memory sqlite cat store; data is lost on restart");
            Ok(Arc::new(SqliteCatGateway::in_memory().await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, Utc};
    use cattery_core::{FixedClock, FixedIdGenerator, SequenceIdGenerator};
    use proptest::prelude::*;

    /// Wraps the in-memory store and counts delete calls.
    #[derive(Default)]
    struct CountingGateway {
        inner: InMemoryCatGateway,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl CatGateway for CountingGateway {
        async fn list(&self) -> Result<Vec<Cat>, StorageError> {
            self.inner.list().await
        }

        async fn get_by_id(&self, id: CatId) -> Result<Option<Cat>, StorageError> {
            self.inner.get_by_id(id).await
        }

        async fn create(&self, cat: &Cat) -> Result<(), StorageError> {
            self.inner.create(cat).await
        }

        async fn delete_by_id(&self, id: CatId) -> Result<(), StorageError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_by_id(id).await
        }
    }

    struct BrokenGateway;

    #[async_trait]
    impl CatGateway for BrokenGateway {
        async fn list(&self) -> Result<Vec<Cat>, StorageError> {
            Err(StorageError::Backend("down".to_string()))
        }

        async fn get_by_id(&self, _id: CatId) -> Result<Option<Cat>, StorageError> {
            Err(StorageError::Backend("down".to_string()))
        }

        async fn create(&self, _cat: &Cat) -> Result<(), StorageError> {
            Err(StorageError::Backend("down".to_string()))
        }

        async fn delete_by_id(&self, _id: CatId) -> Result<(), StorageError> {
            Err(StorageError::Backend("down".to_string()))
        }
    }

    fn fixed_instant() -> DateTime<Utc> {
        "2026-02-14T12:13:14Z".parse().unwrap()
    }

    fn fixed_id() -> CatId {
        "11111111-1111-1111-1111-111111111111".parse().unwrap()
    }

    fn louis() -> CatDto {
        CatDto {
            name: "Louis".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            breed: "tabby".to_string(),
            color: "brown".to_string(),
        }
    }

    fn fixed_service(gateway: Arc<dyn CatGateway>) -> CatService {
        CatService::new(
            gateway,
            Arc::new(FixedClock::new(fixed_instant())),
            Arc::new(FixedIdGenerator::new(fixed_id())),
        )
    }

    #[tokio::test]
    async fn add_cat_assigns_id_and_timestamp_from_collaborators() {
        let service = fixed_service(Arc::new(InMemoryCatGateway::new()));

        let cat = service.add_cat(louis()).await.unwrap();

        assert_eq!(cat.id, fixed_id());
        assert_eq!(cat.created_at, fixed_instant());
        assert_eq!(cat.user_id, None);
        assert_eq!(cat.name, "Louis");
        assert_eq!(service.get_cat(cat.id).await.unwrap(), Some(cat));
    }

    #[tokio::test]
    async fn list_cats_is_empty_then_insertion_ordered() {
        let a = CatId::new();
        let b = CatId::new();
        let service = CatService::new(
            Arc::new(InMemoryCatGateway::new()),
            Arc::new(FixedClock::new(fixed_instant())),
            Arc::new(SequenceIdGenerator::new([a, b])),
        );

        assert!(service.list_cats().await.unwrap().is_empty());

        service.add_cat(louis()).await.unwrap();
        service
            .add_cat(CatDto {
                name: "Mike".to_string(),
                ..louis()
            })
            .await
            .unwrap();

        let ids: Vec<CatId> = service
            .list_cats()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn second_create_with_same_id_propagates_duplicate() {
        let service = fixed_service(Arc::new(InMemoryCatGateway::new()));
        service.add_cat(louis()).await.unwrap();

        let err = service.add_cat(louis()).await.unwrap_err();
        assert!(matches!(err, StorageError::Duplicate(_)));
    }

    #[tokio::test]
    async fn delete_cat_returns_removed_entity_once() {
        let gateway = Arc::new(CountingGateway::default());
        let service = fixed_service(gateway.clone());
        let created = service.add_cat(louis()).await.unwrap();

        assert_eq!(service.delete_cat(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.delete_cat(created.id).await.unwrap(), None);
        assert_eq!(service.get_cat(created.id).await.unwrap(), None);
        assert_eq!(gateway.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_never_reaches_gateway_delete() {
        let gateway = Arc::new(CountingGateway::default());
        let service = fixed_service(gateway.clone());

        assert_eq!(service.delete_cat(CatId::new()).await.unwrap(), None);
        assert_eq!(gateway.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn storage_faults_propagate() {
        let service = fixed_service(Arc::new(BrokenGateway));

        assert!(service.list_cats().await.is_err());
        assert!(service.get_cat(fixed_id()).await.is_err());
        assert!(service.add_cat(louis()).await.is_err());
        assert!(service.delete_cat(fixed_id()).await.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: whatever the client sends, reading back the created cat
        /// yields exactly the client-supplied fields.
        #[test]
        fn created_cat_reads_back_with_client_fields(
            name in ".{0,40}",
            breed in "[a-z ]{0,20}",
            color in "[a-z]{1,12}",
            days in 0i64..20_000,
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let input = CatDto {
                name,
                date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Days::new(days as u64),
                breed,
                color,
            };

            let service = CatService::with_system_defaults(Arc::new(InMemoryCatGateway::new()));
            let fetched = rt.block_on(async {
                let created = service.add_cat(input.clone()).await.unwrap();
                service.get_cat(created.id).await.unwrap().unwrap()
            });

            prop_assert_eq!(fetched.name, input.name);
            prop_assert_eq!(fetched.date_of_birth, input.date_of_birth);
            prop_assert_eq!(fetched.breed, input.breed);
            prop_assert_eq!(fetched.color, input.color);
        }
    }
}

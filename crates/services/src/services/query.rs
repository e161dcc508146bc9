//! Read cache and write path for the admin API.
//!
//! Reads are memoised by `(resource, scope)`; equal parameters hit the cache,
//! different parameters are fetched and cached independently. Writes never
//! touch cached values: a successful mutation invalidates every cached read of
//! its resource so the next read goes back to the server.

use std::{sync::Arc, time::Duration};

use client::{ClientError, RequestBody, ResourceApi};
use dashmap::DashMap;
use models::{ListParams, Resource, review::ModerationPayload};
use moka::future::Cache;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    List(ListParams),
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub scope: QueryScope,
}

impl QueryKey {
    pub fn list(resource: Resource, params: ListParams) -> Self {
        Self {
            resource,
            scope: QueryScope::List(params),
        }
    }

    pub fn detail(resource: Resource, id: impl Into<String>) -> Self {
        Self {
            resource,
            scope: QueryScope::Detail(id.into()),
        }
    }
}

/// Cache slot: the public key plus the resource generation it was read under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    generation: u64,
    key: QueryKey,
}

#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl QueryError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => e.user_message(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub max_capacity: u64,
    /// How long a cached read may be reused before it is fetched again.
    pub stale_after: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            stale_after: Duration::from_secs(300),
        }
    }
}

/// Shared query layer. Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct QueryClient {
    api: Arc<dyn ResourceApi>,
    cache: Cache<Slot, Arc<Value>>,
    generations: Arc<DashMap<Resource, u64>>,
}

impl QueryClient {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self::with_options(api, QueryOptions::default())
    }

    pub fn with_options(api: Arc<dyn ResourceApi>, options: QueryOptions) -> Self {
        let cache = Cache::builder()
            .max_capacity(options.max_capacity)
            .time_to_live(options.stale_after)
            .support_invalidation_closures()
            .build();

        Self {
            api,
            cache,
            generations: Arc::new(DashMap::new()),
        }
    }

    fn generation(&self, resource: Resource) -> u64 {
        self.generations.get(&resource).map(|g| *g).unwrap_or(0)
    }

    fn slot(&self, key: QueryKey) -> Slot {
        Slot {
            generation: self.generation(key.resource),
            key,
        }
    }

    /// Return the cached response for `key`, fetching it on a miss.
    ///
    /// Concurrent reads of the same key share one request; failures are not cached.
    pub async fn read(&self, key: QueryKey) -> Result<Arc<Value>, QueryError> {
        let slot = self.slot(key);
        let api = Arc::clone(&self.api);
        let fetch_key = slot.key.clone();

        self.cache
            .try_get_with(slot, async move {
                debug!(resource = %fetch_key.resource, scope = ?fetch_key.scope, "cache miss; fetching");
                fetch(api.as_ref(), &fetch_key).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<ClientError>| QueryError::Client((*e).clone()))
    }

    /// Cached response for `key`, without fetching.
    pub async fn cached(&self, key: QueryKey) -> Option<Arc<Value>> {
        self.cache.get(&self.slot(key)).await
    }

    /// Mark every cached read of `resource` stale.
    pub fn invalidate(&self, resource: Resource) {
        let generation = {
            let mut entry = self.generations.entry(resource).or_insert(0);
            *entry += 1;
            *entry
        };

        // Older generations are unreachable already; this only frees their memory.
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |slot, _| slot.key.resource == resource && slot.generation < generation)
        {
            warn!(%resource, error = ?e, "could not schedule cache cleanup");
        }
        info!(%resource, generation, "invalidated cached reads");
    }

    pub async fn create(&self, resource: Resource, body: RequestBody) -> Result<Value, QueryError> {
        let res = self.api.create(resource, body).await?;
        self.invalidate(resource);
        Ok(res)
    }

    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: RequestBody,
    ) -> Result<Value, QueryError> {
        let res = self.api.update(resource, id, body).await?;
        self.invalidate(resource);
        Ok(res)
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<Value, QueryError> {
        let res = self.api.delete(resource, id).await?;
        self.invalidate(resource);
        Ok(res)
    }

    pub async fn moderate_review(
        &self,
        id: &str,
        payload: &ModerationPayload,
    ) -> Result<Value, QueryError> {
        let res = self.api.moderate_review(id, payload).await?;
        self.invalidate(Resource::Reviews);
        Ok(res)
    }
}

async fn fetch(api: &dyn ResourceApi, key: &QueryKey) -> Result<Value, ClientError> {
    match &key.scope {
        QueryScope::List(params) => api.fetch_list(key.resource, params).await,
        QueryScope::Detail(id) => api.fetch_one(key.resource, id).await,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::test_support::FakeApi;

    fn setup() -> (Arc<FakeApi>, QueryClient) {
        let api = Arc::new(FakeApi::new());
        api.seed(
            Resource::Products,
            vec![
                json!({ "_id": "p1", "name": "Desk Lamp", "price": 20.0 }),
                json!({ "_id": "p2", "name": "Floor Lamp", "price": 80.0 }),
            ],
        );
        let query = QueryClient::new(api.clone());
        (api, query)
    }

    #[tokio::test]
    async fn test_equal_params_reuse_cache() {
        let (api, query) = setup();
        let key = QueryKey::list(Resource::Products, ListParams::new(0, 10));

        query.read(key.clone()).await.unwrap();
        query.read(key).await.unwrap();

        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_distinct_params_cache_independently() {
        let (api, query) = setup();
        let first = QueryKey::list(Resource::Products, ListParams::new(0, 10));
        let second = QueryKey::list(Resource::Products, ListParams::new(0, 10).with_search("desk"));

        query.read(first.clone()).await.unwrap();
        query.read(second.clone()).await.unwrap();
        query.read(first).await.unwrap();
        query.read(second).await.unwrap();

        assert_eq!(api.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_successful_delete_invalidates_resource() {
        let (api, query) = setup();
        let key = QueryKey::list(Resource::Products, ListParams::new(0, 10));
        query.read(key.clone()).await.unwrap();

        query.delete(Resource::Products, "p1").await.unwrap();
        assert!(query.cached(key.clone()).await.is_none());

        let body = query.read(key).await.unwrap();
        assert_eq!(api.list_calls(), 2);
        let ids: Vec<_> = body["products"]["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["p2"]);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let (api, query) = setup();
        let key = QueryKey::list(Resource::Products, ListParams::new(0, 10));
        query.read(key.clone()).await.unwrap();

        api.fail_next(ClientError::Http {
            status: 500,
            body: String::new(),
        });
        assert!(query.delete(Resource::Products, "p1").await.is_err());

        assert!(query.cached(key).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidation_is_per_resource() {
        let (api, query) = setup();
        api.seed(Resource::Categories, vec![json!({ "_id": "c1", "name": "Lighting" })]);
        let products = QueryKey::list(Resource::Products, ListParams::new(0, 10));
        let categories = QueryKey::list(Resource::Categories, ListParams::new(0, 10));
        query.read(products.clone()).await.unwrap();
        query.read(categories.clone()).await.unwrap();

        query.invalidate(Resource::Products);

        assert!(query.cached(products).await.is_none());
        assert!(query.cached(categories).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_read_is_not_cached() {
        let (api, query) = setup();
        let key = QueryKey::list(Resource::Products, ListParams::new(0, 10));

        api.fail_next(ClientError::Timeout);
        assert!(matches!(
            query.read(key.clone()).await,
            Err(QueryError::Client(ClientError::Timeout))
        ));

        assert!(query.read(key).await.is_ok());
        assert_eq!(api.list_calls(), 2);
    }
}

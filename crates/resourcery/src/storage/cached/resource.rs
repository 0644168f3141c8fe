//! Cached resource repository decorator.
//!
//! Wraps a `ResourceStore` implementation with cache-aside reads,
//! store-first invalidation on writes, and event publishing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use resourcery_core::cache::{
    deserialize_resource, deserialize_resources, resource_key, serialize_resource,
    serialize_resources, Cache, EventPublisher, ALL_RESOURCES_KEY,
};
use resourcery_core::resource::{NewResource, Resource, ResourceEvent, ResourcePatch};
use resourcery_core::storage::{Page, ResourceStore, Result};

/// Cached resource repository decorator.
///
/// Ordering is the correctness-critical invariant: on mutations the store
/// write always precedes any cache call, and on cache-aside reads the cache
/// read always precedes the store read. Caching ahead of a store commit
/// could expose state that never committed.
///
/// No cross-request concurrency control is attempted: two simultaneous
/// updates to the same id race at the store (last write wins, on the
/// database's own row-level consistency) and may transiently leave either
/// serialization in the cache until the next explicit invalidation. That
/// weak-consistency window is accepted, not worked around with locking.
///
/// # Type Parameters
///
/// * `S` - The underlying store implementation
/// * `C` - The cache implementation
/// * `P` - The event publisher for mutation events
pub struct CachedResourceStore<S, C, P>
where
    S: ResourceStore,
    C: Cache,
    P: EventPublisher,
{
    store: Arc<S>,
    cache: Arc<C>,
    publisher: Arc<P>,
    ttl: Duration,
}

impl<S, C, P> CachedResourceStore<S, C, P>
where
    S: ResourceStore,
    C: Cache,
    P: EventPublisher,
{
    /// Creates a new cached resource repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The underlying store to cache
    /// * `cache` - The cache implementation
    /// * `publisher` - The event publisher for mutation events
    /// * `ttl` - Time-to-live for cached values
    pub fn new(store: Arc<S>, cache: Arc<C>, publisher: Arc<P>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            publisher,
            ttl,
        }
    }

    /// Caches a single resource under its `resource_{id}` key, best-effort.
    async fn cache_resource(&self, resource: &Resource) {
        let key = resource_key(resource.id);
        match serialize_resource(resource) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(resource_id = %resource.id, error = %err, "Failed to cache resource");
                }
            }
            Err(err) => {
                tracing::warn!(resource_id = %resource.id, error = %err, "Failed to serialize resource for cache");
            }
        }
    }

    /// Re-reads the full collection from the store and refreshes the
    /// `all_resources` aggregate key. Both the re-read and the cache write
    /// are best-effort; the caller already holds the authoritative result.
    async fn refresh_list_cache(&self) {
        let resources = match self.store.list_resources().await {
            Ok(resources) => resources,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to re-read resources for list cache refresh");
                return;
            }
        };

        match serialize_resources(&resources) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(ALL_RESOURCES_KEY, &bytes, Some(self.ttl)).await {
                    tracing::warn!(error = %err, "Failed to refresh resource list cache");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize resource list for cache");
            }
        }
    }

    /// Deletes the cache entry for an id if one is present, best-effort.
    async fn evict_resource(&self, id: Uuid) {
        let key = resource_key(id);
        if let Ok(Some(_)) = self.cache.get(&key).await {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(resource_id = %id, error = %err, "Failed to invalidate resource cache");
            }
        }
    }

    /// Publishes a mutation event, best-effort.
    async fn publish(&self, event: ResourceEvent) {
        let id = event.resource_id();
        let kind = event.kind();
        if let Err(err) = self.publisher.publish(&event).await {
            tracing::warn!(resource_id = %id, event = kind, error = %err, "Failed to publish resource event");
        }
    }

    /// Attempts to serve the full collection from the `all_resources` key.
    /// Any cache failure, including undecodable bytes, counts as a miss.
    async fn cached_list(&self) -> Option<Vec<Resource>> {
        if let Ok(Some(bytes)) = self.cache.get(ALL_RESOURCES_KEY).await {
            match deserialize_resources(&bytes) {
                Ok(resources) => {
                    tracing::trace!(count = resources.len(), "Cache hit for resource list");
                    return Some(resources);
                }
                Err(_) => {
                    tracing::warn!("Cache resource list deserialization failed");
                }
            }
        }
        None
    }
}

#[async_trait]
impl<S, C, P> ResourceStore for CachedResourceStore<S, C, P>
where
    S: ResourceStore + 'static,
    C: Cache + 'static,
    P: EventPublisher + 'static,
{
    async fn list_resources(&self) -> Result<Vec<Resource>> {
        // Check cache first
        if let Some(resources) = self.cached_list().await {
            return Ok(resources);
        }

        // Cache miss - fetch the full set from the store
        tracing::trace!("Cache miss for resource list");
        let resources = self.store.list_resources().await?;

        // Populate cache; a failure here never turns a successful read
        // into an error.
        match serialize_resources(&resources) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(ALL_RESOURCES_KEY, &bytes, Some(self.ttl)).await {
                    tracing::warn!(error = %err, "Failed to cache resource list");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize resource list for cache");
            }
        }

        Ok(resources)
    }

    async fn paginate_resources(&self, page: Page) -> Result<Vec<Resource>> {
        // A warm aggregate key serves the full unpaginated collection; the
        // window parameters only apply on the cold path, against the store.
        // Callers that need strict pagination must accept this documented
        // asymmetry.
        if let Some(resources) = self.cached_list().await {
            return Ok(resources);
        }

        tracing::trace!(page = page.page, per_page = page.per_page, "Cache miss for resource page");
        let items = self.store.paginate_resources(page).await?;

        // Warm the aggregate key with the full set for subsequent reads.
        self.refresh_list_cache().await;

        Ok(items)
    }

    async fn get_resource(&self, id: Uuid) -> Result<Resource> {
        let key = resource_key(id);

        // Check cache first
        if let Ok(Some(bytes)) = self.cache.get(&key).await {
            match deserialize_resource(&bytes) {
                Ok(resource) => {
                    tracing::trace!(resource_id = %id, "Cache hit for resource");
                    return Ok(resource);
                }
                Err(_) => {
                    // Undecodable bytes count as a miss
                    tracing::warn!(resource_id = %id, "Cache resource deserialization failed");
                }
            }
        }

        // Cache miss - fetch from the store; NotFound propagates untouched
        tracing::trace!(resource_id = %id, "Cache miss for resource");
        let resource = self.store.get_resource(id).await?;

        self.cache_resource(&resource).await;

        Ok(resource)
    }

    async fn create_resource(&self, data: NewResource) -> Result<Resource> {
        // 1. Persist to the store; this write is never skipped or cached around
        let resource = self.store.create_resource(data).await?;

        // 2. Cache the new object and refresh the aggregate key
        self.cache_resource(&resource).await;
        self.refresh_list_cache().await;

        // 3. Publish event
        self.publish(ResourceEvent::created(resource.clone())).await;

        tracing::debug!(resource_id = %resource.id, "Resource created");
        Ok(resource)
    }

    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> Result<Resource> {
        // 1. Persist to the store
        let resource = self.store.update_resource(id, patch).await?;

        // 2. Delete the stale entry if present, then re-cache the fresh
        //    object and refresh the aggregate key
        self.evict_resource(id).await;
        self.cache_resource(&resource).await;
        self.refresh_list_cache().await;

        // 3. Publish event
        self.publish(ResourceEvent::updated(resource.clone())).await;

        tracing::debug!(resource_id = %id, "Resource updated");
        Ok(resource)
    }

    async fn delete_resource(&self, id: Uuid) -> Result<()> {
        // 1. Persist the deletion to the store
        self.store.delete_resource(id).await?;

        // 2. Delete the cache entry explicitly rather than waiting for its
        //    TTL, and refresh the aggregate key
        self.evict_resource(id).await;
        self.refresh_list_cache().await;

        // 3. Publish event
        self.publish(ResourceEvent::deleted(id)).await;

        tracing::debug!(resource_id = %id, "Resource deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{broadcast, RwLock};

    use resourcery_core::cache::{CacheError, Result as CacheResult};
    use resourcery_core::storage::RepositoryError;

    // Mock store that tracks calls
    struct MockStore {
        resources: RwLock<Vec<Resource>>,
        list_calls: AtomicUsize,
        paginate_calls: AtomicUsize,
        get_calls: AtomicUsize,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                resources: RwLock::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
                paginate_calls: AtomicUsize::new(0),
                get_calls: AtomicUsize::new(0),
            }
        }

        async fn insert(&self, resource: Resource) {
            self.resources.write().await.push(resource);
        }
    }

    #[async_trait]
    impl ResourceStore for MockStore {
        async fn list_resources(&self) -> Result<Vec<Resource>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.resources.read().await.clone())
        }

        async fn paginate_resources(&self, page: Page) -> Result<Vec<Resource>> {
            self.paginate_calls.fetch_add(1, Ordering::SeqCst);
            let resources = self.resources.read().await;
            Ok(page.slice(&resources))
        }

        async fn get_resource(&self, id: Uuid) -> Result<Resource> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.resources
                .read()
                .await
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found("Resource", id.to_string()))
        }

        async fn create_resource(&self, data: NewResource) -> Result<Resource> {
            let resource = Resource::new(data.title, data.content);
            self.resources.write().await.push(resource.clone());
            Ok(resource)
        }

        async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> Result<Resource> {
            let mut resources = self.resources.write().await;
            let resource = resources
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RepositoryError::not_found("Resource", id.to_string()))?;
            patch.apply_to(resource);
            Ok(resource.clone())
        }

        async fn delete_resource(&self, id: Uuid) -> Result<()> {
            let mut resources = self.resources.write().await;
            let before = resources.len();
            resources.retain(|r| r.id != id);
            if resources.len() == before {
                return Err(RepositoryError::not_found("Resource", id.to_string()));
            }
            Ok(())
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    // Store whose every operation fails
    struct FailingStore;

    #[async_trait]
    impl ResourceStore for FailingStore {
        async fn list_resources(&self) -> Result<Vec<Resource>> {
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn paginate_resources(&self, _page: Page) -> Result<Vec<Resource>> {
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn get_resource(&self, id: Uuid) -> Result<Resource> {
            let _ = id;
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn create_resource(&self, _data: NewResource) -> Result<Resource> {
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn update_resource(&self, _id: Uuid, _patch: ResourcePatch) -> Result<Resource> {
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn delete_resource(&self, _id: Uuid) -> Result<()> {
            Err(RepositoryError::QueryFailed("store down".to_string()))
        }

        async fn ping(&self) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("store down".to_string()))
        }
    }

    // Mock cache that counts every operation
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        ops: AtomicUsize,
    }

    impl MockCache {
        fn new() -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
                ops: AtomicUsize::new(0),
            }
        }

        async fn contains(&self, key: &str) -> bool {
            self.store.read().await.contains_key(key)
        }

        async fn raw(&self, key: &str) -> Option<Vec<u8>> {
            self.store.read().await.get(key).cloned()
        }

        fn op_count(&self) -> usize {
            self.ops.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.ops.fetch_add(1, Ordering::SeqCst);
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            self.ops.fetch_add(1, Ordering::SeqCst);
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.ops.fetch_add(1, Ordering::SeqCst);
            self.store.write().await.remove(key);
            Ok(())
        }

        async fn ping(&self) -> CacheResult<()> {
            Ok(())
        }
    }

    // Cache whose every operation fails
    struct FailingCache;

    #[async_trait]
    impl Cache for FailingCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::ConnectionFailed("cache down".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("cache down".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("cache down".to_string()))
        }

        async fn ping(&self) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("cache down".to_string()))
        }
    }

    // Mock publisher that records events
    struct MockPublisher {
        events: RwLock<Vec<ResourceEvent>>,
        sender: broadcast::Sender<ResourceEvent>,
    }

    impl MockPublisher {
        fn new() -> Self {
            let (sender, _) = broadcast::channel(100);
            Self {
                events: RwLock::new(Vec::new()),
                sender,
            }
        }

        async fn published_events(&self) -> Vec<ResourceEvent> {
            self.events.read().await.clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockPublisher {
        async fn publish(&self, event: &ResourceEvent) -> CacheResult<()> {
            self.events.write().await.push(event.clone());
            let _ = self.sender.send(event.clone());
            Ok(())
        }

        async fn subscribe(&self) -> CacheResult<broadcast::Receiver<ResourceEvent>> {
            Ok(self.sender.subscribe())
        }
    }

    fn ttl() -> Duration {
        Duration::from_secs(300)
    }

    fn new_resource(title: &str) -> NewResource {
        NewResource {
            title: title.to_string(),
            content: "content".to_string(),
        }
    }

    fn cached_with_mocks() -> (
        Arc<MockStore>,
        Arc<MockCache>,
        Arc<MockPublisher>,
        CachedResourceStore<MockStore, MockCache, MockPublisher>,
    ) {
        let store = Arc::new(MockStore::new());
        let cache = Arc::new(MockCache::new());
        let publisher = Arc::new(MockPublisher::new());
        let cached =
            CachedResourceStore::new(store.clone(), cache.clone(), publisher.clone(), ttl());
        (store, cache, publisher, cached)
    }

    #[tokio::test]
    async fn test_get_cache_miss_fetches_from_store() {
        let (store, cache, _publisher, cached) = cached_with_mocks();
        let resource = Resource::new("Test", "content");
        store.insert(resource.clone()).await;

        // First call - should hit the store
        let result = cached.get_resource(resource.id).await.unwrap();
        assert_eq!(result.id, resource.id);
        assert_eq!(store.get_calls.load(Ordering::SeqCst), 1);

        // Verify cache was populated
        assert!(cache.contains(&resource_key(resource.id)).await);
    }

    #[tokio::test]
    async fn test_get_cache_hit_skips_store() {
        let (store, _cache, _publisher, cached) = cached_with_mocks();
        let resource = Resource::new("Test", "content");
        store.insert(resource.clone()).await;

        // First call - cache miss
        let _ = cached.get_resource(resource.id).await.unwrap();
        assert_eq!(store.get_calls.load(Ordering::SeqCst), 1);

        // Second call - should hit the cache
        let result = cached.get_resource(resource.id).await.unwrap();
        assert_eq!(result.id, resource.id);
        assert_eq!(store.get_calls.load(Ordering::SeqCst), 1); // Still 1
    }

    #[tokio::test]
    async fn test_get_undecodable_cache_bytes_fall_back_to_store() {
        let (store, cache, _publisher, cached) = cached_with_mocks();
        let resource = Resource::new("Test", "content");
        store.insert(resource.clone()).await;

        cache
            .set(&resource_key(resource.id), b"not json", None)
            .await
            .unwrap();

        let result = cached.get_resource(resource.id).await.unwrap();

        assert_eq!(result.id, resource.id);
        assert_eq!(store.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_not_found_propagates() {
        let (_store, cache, _publisher, cached) = cached_with_mocks();
        let missing = Uuid::new_v4();

        let result = cached.get_resource(missing).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        // A miss alone never creates a cache entry
        assert!(!cache.contains(&resource_key(missing)).await);
    }

    #[tokio::test]
    async fn test_list_cold_path_populates_cache() {
        let (store, cache, _publisher, cached) = cached_with_mocks();
        store.insert(Resource::new("One", "a")).await;
        store.insert(Resource::new("Two", "b")).await;

        let resources = cached.list_resources().await.unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(ALL_RESOURCES_KEY).await);
    }

    #[tokio::test]
    async fn test_list_warm_path_skips_store() {
        let (store, _cache, _publisher, cached) = cached_with_mocks();
        store.insert(Resource::new("One", "a")).await;

        let _ = cached.list_resources().await.unwrap();
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);

        let resources = cached.list_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1); // Still 1
    }

    #[tokio::test]
    async fn test_warm_list_ignores_pagination() {
        // Documents the accepted asymmetry: once the aggregate key is warm,
        // page/per_page are ignored and the full collection is returned.
        let (store, _cache, _publisher, cached) = cached_with_mocks();
        for i in 0..3 {
            store.insert(Resource::new(format!("r{}", i), "c")).await;
        }

        // Warm the aggregate key
        let _ = cached.list_resources().await.unwrap();

        let page = cached
            .paginate_resources(Page::new(1, 1).unwrap())
            .await
            .unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(store.paginate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cold_paginate_queries_store_and_warms_cache() {
        let (store, cache, _publisher, cached) = cached_with_mocks();
        for i in 0..3 {
            store.insert(Resource::new(format!("r{}", i), "c")).await;
        }

        let page = cached
            .paginate_resources(Page::new(1, 2).unwrap())
            .await
            .unwrap();

        // Cold path honors the window against the store
        assert_eq!(page.len(), 2);
        assert_eq!(store.paginate_calls.load(Ordering::SeqCst), 1);

        // and leaves the full set behind for subsequent reads
        let bytes = cache.raw(ALL_RESOURCES_KEY).await.unwrap();
        assert_eq!(deserialize_resources(&bytes).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_caches_object_and_refreshes_list() {
        let (_store, cache, _publisher, cached) = cached_with_mocks();

        let resource = cached.create_resource(new_resource("New")).await.unwrap();

        assert!(cache.contains(&resource_key(resource.id)).await);
        let bytes = cache.raw(ALL_RESOURCES_KEY).await.unwrap();
        let listed = deserialize_resources(&bytes).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, resource.id);
    }

    #[tokio::test]
    async fn test_create_refreshes_warm_list_cache() {
        // The list staleness boundary: a warm aggregate key must pick up a
        // freshly created resource, not serve a stale collection.
        let (store, _cache, _publisher, cached) = cached_with_mocks();
        store.insert(Resource::new("Existing", "a")).await;

        // Warm the aggregate key with the single existing resource
        assert_eq!(cached.list_resources().await.unwrap().len(), 1);

        let created = cached.create_resource(new_resource("Fresh")).await.unwrap();

        // The next list is served from the refreshed cache and includes it
        let listed = cached.list_resources().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|r| r.id == created.id));
        // One list for warming, one inside the refresh; the final read is warm
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_returns_resource_with_creation_semantics() {
        let (_store, _cache, _publisher, cached) = cached_with_mocks();

        let resource = cached
            .create_resource(NewResource {
                title: "t1".to_string(),
                content: "c1".to_string(),
            })
            .await
            .unwrap();

        assert!(!resource.id.is_nil());
        assert_eq!(resource.title, "t1");
        assert_eq!(resource.content.as_deref(), Some("c1"));
        assert_eq!(resource.created, resource.modified);
    }

    #[tokio::test]
    async fn test_create_publishes_event() {
        let (_store, _cache, publisher, cached) = cached_with_mocks();

        let resource = cached.create_resource(new_resource("New")).await.unwrap();

        let events = publisher.published_events().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ResourceEvent::Created { .. }));
        assert_eq!(events[0].resource_id(), resource.id);
    }

    #[tokio::test]
    async fn test_update_invalidates_stale_cache_entry() {
        // Create with title "A", warm the cache, update to "B", read again:
        // the stale "A" serialization must not survive.
        let (store, _cache, _publisher, cached) = cached_with_mocks();

        let created = cached.create_resource(new_resource("A")).await.unwrap();
        let _ = cached.get_resource(created.id).await.unwrap();

        let updated = cached
            .update_resource(
                created.id,
                ResourcePatch {
                    title: Some("B".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "B");

        let fetched = cached.get_resource(created.id).await.unwrap();
        assert_eq!(fetched.title, "B");
        // The re-cache after update means the final get is served warm
        assert_eq!(store.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_refreshes_list_and_publishes() {
        let (_store, cache, publisher, cached) = cached_with_mocks();
        let created = cached.create_resource(new_resource("A")).await.unwrap();

        let _ = cached
            .update_resource(
                created.id,
                ResourcePatch {
                    title: Some("B".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();

        let bytes = cache.raw(ALL_RESOURCES_KEY).await.unwrap();
        let listed = deserialize_resources(&bytes).unwrap();
        assert_eq!(listed[0].title, "B");

        let events = publisher.published_events().await;
        assert!(matches!(events.last(), Some(ResourceEvent::Updated { .. })));
    }

    #[tokio::test]
    async fn test_update_not_found_propagates() {
        let (_store, _cache, publisher, cached) = cached_with_mocks();

        let result = cached
            .update_resource(
                Uuid::new_v4(),
                ResourcePatch {
                    title: Some("B".to_string()),
                    content: None,
                },
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(publisher.published_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_evicts_entry_and_refreshes_list() {
        let (_store, cache, publisher, cached) = cached_with_mocks();
        let created = cached.create_resource(new_resource("Doomed")).await.unwrap();
        let key = resource_key(created.id);
        assert!(cache.contains(&key).await);

        cached.delete_resource(created.id).await.unwrap();

        assert!(!cache.contains(&key).await);
        let bytes = cache.raw(ALL_RESOURCES_KEY).await.unwrap();
        assert!(deserialize_resources(&bytes).unwrap().is_empty());
        assert!(matches!(
            publisher.published_events().await.last(),
            Some(ResourceEvent::Deleted { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_store, _cache, _publisher, cached) = cached_with_mocks();
        let created = cached.create_resource(new_resource("t1")).await.unwrap();

        cached.delete_resource(created.id).await.unwrap();

        assert!(matches!(
            cached.get_resource(created.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_not_found_propagates() {
        let (_store, _cache, _publisher, cached) = cached_with_mocks();

        let result = cached.delete_resource(Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_failed_store_write_issues_no_cache_calls() {
        // Store-first ordering: when the store call fails, the cache must
        // not see a single operation.
        let store = Arc::new(FailingStore);
        let cache = Arc::new(MockCache::new());
        let publisher = Arc::new(MockPublisher::new());
        let cached =
            CachedResourceStore::new(store, cache.clone(), publisher.clone(), ttl());

        assert!(cached.create_resource(new_resource("x")).await.is_err());
        assert!(cached
            .update_resource(
                Uuid::new_v4(),
                ResourcePatch {
                    title: Some("x".to_string()),
                    content: None,
                },
            )
            .await
            .is_err());
        assert!(cached.delete_resource(Uuid::new_v4()).await.is_err());

        assert_eq!(cache.op_count(), 0);
        assert!(publisher.published_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_cache_failure_isolation() {
        // A cache that errors on every call must leave all operations
        // returning store truth with no error surfaced.
        let store = Arc::new(MockStore::new());
        let cache = Arc::new(FailingCache);
        let publisher = Arc::new(MockPublisher::new());
        let cached = CachedResourceStore::new(store.clone(), cache, publisher, ttl());

        let created = cached.create_resource(new_resource("t1")).await.unwrap();
        assert_eq!(created.title, "t1");

        let fetched = cached.get_resource(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);

        let listed = cached.list_resources().await.unwrap();
        assert_eq!(listed.len(), 1);

        let paged = cached
            .paginate_resources(Page::new(1, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(paged.len(), 1);

        let updated = cached
            .update_resource(
                created.id,
                ResourcePatch {
                    title: Some("t2".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "t2");

        cached.delete_resource(created.id).await.unwrap();
        assert!(matches!(
            cached.get_resource(created.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }
}

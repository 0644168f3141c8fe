//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It uses repository trait objects for storage
//! abstraction and supports different backend combinations via feature
//! flags. The store and cache handles are injected here once, at startup;
//! nothing in the request path reaches for process-wide singletons.

use std::sync::Arc;

use axum::extract::FromRef;

use resourcery_auth::TokenService;
use resourcery_core::cache::{Cache, EventPublisher};
use resourcery_core::storage::ResourceStore;

use crate::config::Config;
use crate::storage::CachedResourceStore;

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including the cached repository and the cache/pub-sub handles.
#[derive(Clone)]
pub struct AppState {
    /// Resource repository (cached decorator over the active store backend).
    pub resources: Arc<dyn ResourceStore>,
    /// Direct cache handle, used by the readiness probe.
    pub cache: Arc<dyn Cache>,
    /// Event publisher for the subscriber task.
    pub publisher: Arc<dyn EventPublisher>,
    /// Token issuance and verification.
    pub tokens: TokenService,
    /// Page size when the caller supplies none.
    pub default_per_page: u32,
}

// Lets the auth middleware extract the token service straight from state.
impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl AppState {
    /// Builds the state from configuration, wiring the feature-selected
    /// store and cache backends through the cached repository decorator.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        #[cfg(feature = "inmemory")]
        let store = Arc::new(crate::storage::InMemoryStore::new());

        #[cfg(feature = "postgres")]
        let store = Arc::new(crate::storage::PostgresStore::connect(&config.database_url).await?);

        #[cfg(feature = "memory")]
        let cache = Arc::new(crate::cache::MemoryCache::new(config.cache_max_entries));

        #[cfg(feature = "redis")]
        let cache = Arc::new(crate::cache::RedisCache::new(&config.redis_url).await?);

        #[cfg(feature = "memory")]
        let publisher = Arc::new(crate::cache::MemoryPubSub::new());

        #[cfg(feature = "redis")]
        let publisher = Arc::new(crate::cache::RedisPubSub::new(&config.redis_url).await?);

        let resources = Arc::new(CachedResourceStore::new(
            store,
            cache.clone(),
            publisher.clone(),
            config.cache_ttl(),
        ));

        Ok(Self {
            resources,
            cache,
            publisher,
            tokens: TokenService::new(&config.auth),
            default_per_page: config.default_per_page,
        })
    }
}

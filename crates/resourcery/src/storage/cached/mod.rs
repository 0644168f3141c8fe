//! Cached repository decorator.
//!
//! This module provides the decorator that wraps a `ResourceStore` with
//! caching behavior and event publishing:
//!
//! - **Reads**: Check cache first, on miss fetch from the store and
//!   populate the cache
//! - **Writes**: Persist to the store, then invalidate/refresh the cache
//!   and publish an event
//!
//! The store is the sole source of truth. Cache and publish failures are
//! swallowed at the point of interaction; cache downtime costs latency,
//! never correctness.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let cache = Arc::new(MemoryCache::new(10_000));
//! let publisher = Arc::new(MemoryPubSub::new());
//!
//! let cached = CachedResourceStore::new(store, cache, publisher, Duration::from_secs(300));
//! ```

mod resource;

pub use resource::CachedResourceStore;

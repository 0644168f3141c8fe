use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::resource::ResourceEvent;

use super::Result;

/// Trait for basic cache operations.
///
/// Implementations are best-effort collaborators: callers are expected to
/// treat any error as a miss and fall back to the store.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Verifies the cache connection is alive (health checks).
    async fn ping(&self) -> Result<()>;
}

/// Trait for publishing and subscribing to resource mutation events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a resource event to subscribers.
    async fn publish(&self, event: &ResourceEvent) -> Result<()>;

    /// Subscribes to resource events.
    async fn subscribe(&self) -> Result<broadcast::Receiver<ResourceEvent>>;
}

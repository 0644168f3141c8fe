//! In-memory pub/sub implementation.
//!
//! Provides a thread-safe pub/sub mechanism for resource events using a
//! tokio broadcast channel. All events share one channel, matching the
//! single well-known channel used by the Redis backend.

use async_trait::async_trait;
use tokio::sync::broadcast;

use resourcery_core::cache::{EventPublisher, Result};
use resourcery_core::resource::ResourceEvent;

/// Channel capacity for pub/sub messages.
const CHANNEL_CAPACITY: usize = 100;

/// In-memory pub/sub implementation.
#[derive(Debug, Clone)]
pub struct MemoryPubSub {
    sender: broadcast::Sender<ResourceEvent>,
}

impl MemoryPubSub {
    /// Creates a new pub/sub instance.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl Default for MemoryPubSub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MemoryPubSub {
    async fn publish(&self, event: &ResourceEvent) -> Result<()> {
        // Send the event. If there are no receivers, that's fine -
        // it just means no one is subscribed right now.
        let _ = self.sender.send(event.clone());
        Ok(())
    }

    async fn subscribe(&self) -> Result<broadcast::Receiver<ResourceEvent>> {
        Ok(self.sender.subscribe())
    }
}

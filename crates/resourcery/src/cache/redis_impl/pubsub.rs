//! Redis pub/sub implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};

use resourcery_core::cache::{CacheError, EventPublisher, Result, RESOURCE_EVENTS_CHANNEL};
use resourcery_core::resource::ResourceEvent;

use super::error::map_redis_error;

/// Channel capacity for the local broadcast fan-out.
const CHANNEL_CAPACITY: usize = 100;

/// Redis pub/sub backend for cross-instance resource event broadcasting.
///
/// Events are published as JSON on the well-known resource channel. The
/// first local subscriber lazily spawns a bridge task that forwards the
/// Redis stream into a tokio broadcast channel.
pub struct RedisPubSub {
    client: redis::Client,
    sender: Arc<RwLock<Option<broadcast::Sender<ResourceEvent>>>>,
}

impl RedisPubSub {
    /// Creates a new Redis pub/sub connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;

        // Verify connection by getting a connection
        let _ = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        Ok(Self {
            client,
            sender: Arc::new(RwLock::new(None)),
        })
    }
}

#[async_trait]
impl EventPublisher for RedisPubSub {
    async fn publish(&self, event: &ResourceEvent) -> Result<()> {
        // Serialize the event to JSON
        let payload =
            serde_json::to_string(event).map_err(|e| CacheError::Serialization(e.to_string()))?;

        // Get a connection and publish
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;

        conn.publish::<_, _, ()>(RESOURCE_EVENTS_CHANNEL, &payload)
            .await
            .map_err(|e| CacheError::PublishFailed(e.to_string()))?;

        Ok(())
    }

    async fn subscribe(&self) -> Result<broadcast::Receiver<ResourceEvent>> {
        // Reuse the bridge task if one is already running
        {
            let sender = self.sender.read().await;
            if let Some(sender) = sender.as_ref() {
                return Ok(sender.subscribe());
            }
        }

        let mut guard = self.sender.write().await;
        // Double-check in case another task created it
        if let Some(sender) = guard.as_ref() {
            return Ok(sender.subscribe());
        }

        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
        *guard = Some(tx.clone());

        // Spawn a background task bridging the Redis stream into the
        // broadcast channel
        let client = self.client.clone();
        let sender = Arc::clone(&self.sender);

        tokio::spawn(async move {
            if let Err(e) = run_subscription_loop(client, tx, sender).await {
                tracing::error!("Redis subscription error for resource events: {}", e);
            }
        });

        Ok(rx)
    }
}

/// Runs the Redis subscription loop, forwarding messages to the broadcast channel.
async fn run_subscription_loop(
    client: redis::Client,
    tx: broadcast::Sender<ResourceEvent>,
    sender: Arc<RwLock<Option<broadcast::Sender<ResourceEvent>>>>,
) -> Result<()> {
    let mut pubsub = client.get_async_pubsub().await.map_err(map_redis_error)?;

    pubsub
        .subscribe(RESOURCE_EVENTS_CHANNEL)
        .await
        .map_err(map_redis_error)?;

    let mut stream = pubsub.on_message();

    loop {
        match stream.next().await {
            Some(msg) => {
                let payload: String = msg.get_payload().map_err(map_redis_error)?;

                match serde_json::from_str::<ResourceEvent>(&payload) {
                    Ok(event) => {
                        // Ignore send errors (no receivers)
                        let _ = tx.send(event);
                    }
                    Err(e) => {
                        // Payloads that don't decode into a known event are
                        // the unhandled branch of the dispatch.
                        tracing::warn!(
                            "Unhandled resource event payload: {} - payload: {}",
                            e,
                            payload
                        );
                    }
                }
            }
            None => {
                tracing::info!("Redis subscription stream ended for resource events");
                break;
            }
        }
    }

    // Clean up on exit so the next subscribe respawns the bridge
    let mut guard = sender.write().await;
    *guard = None;

    Ok(())
}

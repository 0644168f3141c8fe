//! Resource event subscriber.
//!
//! One background task subscribes to the event channel and routes each
//! event through an explicit dispatch on its tag. Payloads that fail to
//! decode into a known event never reach this point - the transport
//! bridges drop them through their unhandled branch with a warning.
//!
//! The handlers here are audit observers; services interested in acting on
//! mutations subscribe to the same channel out of process.

use std::sync::Arc;

use uuid::Uuid;

use tokio::sync::broadcast::error::RecvError;

use resourcery_core::cache::EventPublisher;
use resourcery_core::resource::{Resource, ResourceEvent};

/// Spawns the event subscriber task.
pub fn spawn_event_subscriber(publisher: Arc<dyn EventPublisher>) {
    tokio::spawn(async move {
        let mut receiver = match publisher.subscribe().await {
            Ok(receiver) => receiver,
            Err(err) => {
                tracing::error!(error = %err, "Failed to subscribe to resource events");
                return;
            }
        };

        loop {
            match receiver.recv().await {
                Ok(event) => dispatch(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event subscriber lagged behind");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Event channel closed, stopping subscriber");
                    break;
                }
            }
        }
    });
}

/// Routes an event to its handler. One arm per known event kind; adding a
/// variant to `ResourceEvent` forces a new arm here.
fn dispatch(event: &ResourceEvent) {
    match event {
        ResourceEvent::Created { resource } => on_resource_created(resource),
        ResourceEvent::Updated { resource } => on_resource_updated(resource),
        ResourceEvent::Deleted { id } => on_resource_deleted(*id),
    }
}

fn on_resource_created(resource: &Resource) {
    tracing::info!(resource_id = %resource.id, title = %resource.title, "Observed resource creation");
}

fn on_resource_updated(resource: &Resource) {
    tracing::info!(resource_id = %resource.id, modified = %resource.modified, "Observed resource update");
}

fn on_resource_deleted(id: Uuid) {
    tracing::info!(resource_id = %id, "Observed resource deletion");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_handles_every_event_kind() {
        let resource = Resource::new("Test", "content");
        dispatch(&ResourceEvent::created(resource.clone()));
        dispatch(&ResourceEvent::updated(resource.clone()));
        dispatch(&ResourceEvent::deleted(resource.id));
    }
}

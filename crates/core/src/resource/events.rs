use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Resource;

/// Event published after a successful mutation of the store.
///
/// Events are serialized to JSON for the pub/sub transport. The tag drives
/// the subscriber's dispatch table; payloads that do not decode into one of
/// these variants fall into the subscriber's unhandled branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResourceEvent {
    Created { resource: Resource },
    Updated { resource: Resource },
    Deleted { id: Uuid },
}

impl ResourceEvent {
    pub fn created(resource: Resource) -> Self {
        Self::Created { resource }
    }

    pub fn updated(resource: Resource) -> Self {
        Self::Updated { resource }
    }

    pub fn deleted(id: Uuid) -> Self {
        Self::Deleted { id }
    }

    /// The id of the resource this event concerns.
    pub fn resource_id(&self) -> Uuid {
        match self {
            Self::Created { resource } | Self::Updated { resource } => resource.id,
            Self::Deleted { id } => *id,
        }
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
        }
    }
}

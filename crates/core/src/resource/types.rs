use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single domain entity managed by this service.
///
/// `content` is required at creation time but nullable afterwards.
/// `created` is stamped once at persistence time; `modified` moves forward
/// on every mutation, so `created <= modified` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Resource {
    /// Creates a new resource with a fresh id and both timestamps set to now.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: Some(content.into()),
            created: now,
            modified: now,
        }
    }

    /// Advances the `modified` timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Sets a specific ID for this resource (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the `created` timestamp (useful for testing).
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Sets the `modified` timestamp (useful for testing).
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = modified;
        self
    }

    /// Clears the content field (useful for testing nullable content).
    pub fn without_content(mut self) -> Self {
        self.content = None;
        self
    }
}

/// Data required to create a resource. Both fields are mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub title: String,
    pub content: String,
}

/// Partial update for a resource. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ResourcePatch {
    /// Returns true if the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Applies the patch to a resource and advances its `modified` timestamp.
    pub fn apply_to(self, resource: &mut Resource) {
        if let Some(title) = self.title {
            resource.title = title;
        }
        if let Some(content) = self.content {
            resource.content = Some(content);
        }
        resource.touch();
    }
}

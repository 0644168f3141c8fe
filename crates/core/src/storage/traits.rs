use async_trait::async_trait;
use uuid::Uuid;

use crate::resource::{NewResource, Resource, ResourcePatch};

use super::{Page, Result};

/// Repository for resource CRUD operations.
///
/// Both the store backends and the cached decorator implement this trait, so
/// handlers only ever see `Arc<dyn ResourceStore>`. Point reads and mutations
/// on a missing id fail with `RepositoryError::NotFound`.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Returns all resources.
    async fn list_resources(&self) -> Result<Vec<Resource>>;

    /// Returns one pagination window of resources.
    async fn paginate_resources(&self, page: Page) -> Result<Vec<Resource>>;

    /// Gets a resource by its ID.
    async fn get_resource(&self, id: Uuid) -> Result<Resource>;

    /// Creates a new resource, assigning its id and timestamps.
    async fn create_resource(&self, data: NewResource) -> Result<Resource>;

    /// Applies a partial update to an existing resource.
    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> Result<Resource>;

    /// Deletes a resource by its ID.
    async fn delete_resource(&self, id: Uuid) -> Result<()>;

    /// Verifies the store connection is alive (health checks).
    async fn ping(&self) -> Result<()>;
}

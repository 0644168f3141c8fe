use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use resourcery_core::resource::{NewResource, Resource, ResourcePatch};
use resourcery_core::storage::{Page, RepositoryError, ResourceStore, Result};

/// In-memory resource store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resources: RwLock<Vec<Resource>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn list_resources(&self) -> Result<Vec<Resource>> {
        Ok(self.resources.read().await.clone())
    }

    async fn paginate_resources(&self, page: Page) -> Result<Vec<Resource>> {
        let resources = self.resources.read().await;
        Ok(page.slice(&resources))
    }

    async fn get_resource(&self, id: Uuid) -> Result<Resource> {
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

//! Postgres repository implementation.
//!
//! Implements the `ResourceStore` trait from `resourcery_core::storage`
//! using sqlx's runtime query API, so the build needs no live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

use resourcery_core::resource::{NewResource, Resource, ResourcePatch};
use resourcery_core::storage::{Page, RepositoryError, ResourceStore, Result};

use super::error::{map_sqlx_error, map_sqlx_error_with_id};
use super::schema;

/// Postgres-based resource store.
///
/// The pool is the process-wide shared connection resource; each call
/// borrows a connection for its single statement.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to the database and bootstraps the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        sqlx::query(schema::CREATE_TABLES)
            .execute(&pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(Self { pool })
    }
}

fn row_to_resource(row: &PgRow) -> std::result::Result<Resource, sqlx::Error> {
    Ok(Resource {
        id: row.try_get::<Uuid, _>("id")?,
        title: row.try_get::<String, _>("title")?,
        content: row.try_get::<Option<String>, _>("content")?,
        created: row.try_get::<DateTime<Utc>, _>("created")?,
        modified: row.try_get::<DateTime<Utc>, _>("modified")?,
    })
}

#[async_trait]
impl ResourceStore for PostgresStore {
    async fn list_resources(&self) -> Result<Vec<Resource>> {
        let rows = sqlx::query(schema::SELECT_ALL_RESOURCES)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Resource"))?;

        rows.iter()
            .map(|row| row_to_resource(row).map_err(|e| map_sqlx_error(e, "Resource")))
            .collect()
    }

    async fn paginate_resources(&self, page: Page) -> Result<Vec<Resource>> {
        let rows = sqlx::query(schema::SELECT_RESOURCES_PAGE)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Resource"))?;

        rows.iter()
            .map(|row| row_to_resource(row).map_err(|e| map_sqlx_error(e, "Resource")))
            .collect()
    }

    async fn get_resource(&self, id: Uuid) -> Result<Resource> {
        let row = sqlx::query(schema::SELECT_RESOURCE_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Resource", id.to_string()))?
            .ok_or_else(|| RepositoryError::not_found("Resource", id.to_string()))?;

        row_to_resource(&row).map_err(|e| map_sqlx_error_with_id(e, "Resource", id.to_string()))
    }

    async fn create_resource(&self, data: NewResource) -> Result<Resource> {
        // Id and both timestamps are stamped here, with one clock, so
        // `created <= modified` cannot be broken by clock mixing.
        let resource = Resource::new(data.title, data.content);

        sqlx::query(schema::INSERT_RESOURCE)
            .bind(resource.id)
            .bind(&resource.title)
            .bind(&resource.content)
            .bind(resource.created)
            .bind(resource.modified)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Resource", resource.id.to_string()))?;

        Ok(resource)
    }

    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> Result<Resource> {
        let row = sqlx::query(schema::UPDATE_RESOURCE)
            .bind(id)
            .bind(patch.title)
            .bind(patch.content)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Resource", id.to_string()))?
            .ok_or_else(|| RepositoryError::not_found("Resource", id.to_string()))?;

        row_to_resource(&row).map_err(|e| map_sqlx_error_with_id(e, "Resource", id.to_string()))
    }

    async fn delete_resource(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(schema::DELETE_RESOURCE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Resource", id.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Resource", id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

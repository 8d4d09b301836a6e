use crate::domain::model::{CatalogEntity, EntityId};
use crate::infra::http::error::ApiError;
use async_trait::async_trait;

/// Remote persistence for one entity type.
///
/// [`crate::CatalogClient`] implements this for books, authors and genres; list pages and editor
/// flows only see the trait, so tests can substitute an in-memory service.
#[async_trait]
pub trait EntityService<E: CatalogEntity>: Send + Sync {
    async fn list(&self) -> Result<Vec<E>, ApiError>;

    async fn get(&self, id: &EntityId) -> Result<E, ApiError>;

    async fn create(&self, draft: &E::Draft) -> Result<(), ApiError>;

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<(), ApiError>;

    async fn delete(&self, id: &EntityId) -> Result<(), ApiError>;
}

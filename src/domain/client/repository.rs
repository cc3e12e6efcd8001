use crate::domain::client::{
    entity::{Client, ClientUpdate, NewClient},
    value_objects::ClientId,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn insert(&self, client: NewClient) -> DomainResult<Client>;
    async fn update(&self, update: ClientUpdate) -> DomainResult<Client>;
    /// Returns `false` when no row matched.
    async fn delete(&self, id: ClientId) -> DomainResult<bool>;
    async fn find_by_id(&self, id: ClientId) -> DomainResult<Option<Client>>;
    /// Roster ordered by client name, ascending.
    async fn list_by_name(&self) -> DomainResult<Vec<Client>>;
}

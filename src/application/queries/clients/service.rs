use std::sync::Arc;

use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ClientDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::client::{ClientId, ClientRepository},
};

pub struct ClientQueryService {
    client_repo: Arc<dyn ClientRepository>,
}

impl ClientQueryService {
    pub fn new(client_repo: Arc<dyn ClientRepository>) -> Self {
        Self { client_repo }
    }

    /// The whole roster, ordered by name.
    pub async fn list_clients(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<ClientDto>> {
        ensure_capability(actor, "clients", "read")?;

        let clients = self.client_repo.list_by_name().await?;
        Ok(clients.into_iter().map(Into::into).collect())
    }

    pub async fn get_client(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<ClientDto> {
        ensure_capability(actor, "clients", "read")?;

        let id = ClientId::new(id)?;
        let client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("client not found"))?;
        Ok(client.into())
    }
}

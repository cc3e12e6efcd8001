use super::ClientCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{client::ClientId, events::ChangeKind},
};

pub struct DeleteClientCommand {
    pub id: i64,
    pub confirmed: bool,
}

impl ClientCommandService {
    /// Activities logged against the client are left in place.
    pub async fn delete_client(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteClientCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "clients", "delete")?;

        let id = ClientId::new(command.id)?;
        if !command.confirmed {
            return Err(ApplicationError::unconfirmed_delete("client"));
        }

        if !self.client_repo.delete(id).await? {
            return Err(ApplicationError::not_found("client not found"));
        }

        tracing::info!(client_id = id.0, actor = actor.id.0, "deleted client");
        self.notify(ChangeKind::Deleted, id);
        Ok(())
    }
}

use super::{ClientCommandService, ClientFields};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ClientDto},
        error::ApplicationResult,
    },
    domain::{
        client::{ClientId, ClientUpdate},
        events::ChangeKind,
    },
};

pub struct UpdateClientCommand {
    pub id: i64,
    pub fields: ClientFields,
}

impl ClientCommandService {
    /// Existing activities keep the client name they were logged with.
    pub async fn update_client(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateClientCommand,
    ) -> ApplicationResult<ClientDto> {
        ensure_capability(actor, "clients", "update")?;

        let id = ClientId::new(command.id)?;
        let (name, contact, notes) = command.fields.normalise()?;
        let updated = self
            .client_repo
            .update(ClientUpdate {
                id,
                name,
                contact,
                notes,
                updated_at: self.clock.now(),
            })
            .await?;

        tracing::info!(client_id = id.0, actor = actor.id.0, "updated client");
        self.notify(ChangeKind::Updated, id);
        Ok(updated.into())
    }
}

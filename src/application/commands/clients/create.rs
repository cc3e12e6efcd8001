use super::ClientCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ClientDto},
        error::ApplicationResult,
    },
    domain::{
        client::{ClientContact, ClientName, NewClient, value_objects::optional_text},
        errors::DomainResult,
        events::ChangeKind,
    },
};

/// Editable fields of the client form.
#[derive(Debug, Clone, Default)]
pub struct ClientFields {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl ClientFields {
    pub(super) fn normalise(self) -> DomainResult<(ClientName, ClientContact, Option<String>)> {
        let name = ClientName::new(self.name)?;
        let contact = ClientContact {
            name: optional_text(self.contact_person),
            email: optional_text(self.email),
            phone: optional_text(self.phone),
        };
        Ok((name, contact, optional_text(self.notes)))
    }
}

pub struct CreateClientCommand {
    pub fields: ClientFields,
}

impl ClientCommandService {
    pub async fn create_client(
        &self,
        actor: &AuthenticatedUser,
        command: CreateClientCommand,
    ) -> ApplicationResult<ClientDto> {
        ensure_capability(actor, "clients", "create")?;

        let (name, contact, notes) = command.fields.normalise()?;
        let created = self
            .client_repo
            .insert(NewClient {
                name,
                contact,
                notes,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(client_id = created.id.0, actor = actor.id.0, "created client");
        self.notify(ChangeKind::Created, created.id);
        Ok(created.into())
    }
}

use super::ActivityCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{activity::ActivityId, events::ChangeKind},
};

pub struct DeleteActivityCommand {
    pub id: i64,
    pub confirmed: bool,
}

impl ActivityCommandService {
    pub async fn delete_activity(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteActivityCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "activities", "delete")?;

        let id = ActivityId::new(command.id)?;
        if !command.confirmed {
            return Err(ApplicationError::unconfirmed_delete("activity"));
        }

        if !self.activity_repo.delete(id).await? {
            return Err(ApplicationError::not_found("activity not found"));
        }

        tracing::info!(activity_id = id.0, actor = actor.id.0, "deleted activity");
        self.notify(ChangeKind::Deleted, id);
        Ok(())
    }
}

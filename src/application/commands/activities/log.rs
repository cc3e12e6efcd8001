use super::{ActivityCommandService, ActivityForm};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ActivityDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{activity::NewActivity, events::ChangeKind},
};

pub struct LogActivityCommand {
    pub form: ActivityForm,
}

impl ActivityCommandService {
    pub async fn log_activity(
        &self,
        actor: &AuthenticatedUser,
        command: LogActivityCommand,
    ) -> ApplicationResult<ActivityDto> {
        ensure_capability(actor, "activities", "create")?;

        let now = self.clock.now();
        let draft = self.build_draft(command.form, now).await?;
        let created = self
            .activity_repo
            .insert(NewActivity {
                draft,
                created_at: now,
                created_by: actor.snapshot(),
            })
            .await?;

        tracing::info!(
            activity_id = created.id.0,
            client_id = created.client.id.0,
            actor = actor.id.0,
            "logged activity"
        );
        self.notify(ChangeKind::Created, created.id);
        Ok(created.into())
    }
}

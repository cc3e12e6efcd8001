use super::{ActivityCommandService, ActivityForm};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ActivityDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityId, ActivityUpdate},
        events::ChangeKind,
    },
};

pub struct UpdateActivityCommand {
    pub id: i64,
    pub form: ActivityForm,
}

impl ActivityCommandService {
    /// Replaces the form fields. A missing `activity_at` keeps the stored one.
    pub async fn update_activity(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateActivityCommand,
    ) -> ApplicationResult<ActivityDto> {
        ensure_capability(actor, "activities", "update")?;

        let id = ActivityId::new(command.id)?;
        let existing = self
            .activity_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("activity not found"))?;

        let draft = self.build_draft(command.form, existing.activity_at).await?;
        let updated = self
            .activity_repo
            .update(ActivityUpdate {
                id,
                draft,
                modified_at: self.clock.now(),
                modified_by: actor.snapshot(),
            })
            .await?;

        tracing::info!(activity_id = id.0, actor = actor.id.0, "updated activity");
        self.notify(ChangeKind::Updated, id);
        Ok(updated.into())
    }
}

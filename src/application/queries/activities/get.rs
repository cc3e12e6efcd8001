use super::ActivityQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ActivityDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::activity::ActivityId,
};

impl ActivityQueryService {
    pub async fn get_activity(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ActivityDto> {
        ensure_capability(actor, "activities", "read")?;

        let id = ActivityId::new(id)?;
        let activity = self
            .activity_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("activity not found"))?;
        Ok(activity.into())
    }
}

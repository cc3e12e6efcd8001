use super::ActivityCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        activity::{
            ActivityDraft, ActivityStatus, ClientSnapshot, ContactMethod, Direction, Priority,
            Subject, UserSnapshot,
        },
        client::{ClientId, value_objects::optional_text},
        user::UserId,
    },
};
use chrono::{DateTime, Utc};

/// Fields of the log-activity form as submitted. Absent choices fall back to
/// the form defaults.
#[derive(Debug, Clone, Default)]
pub struct ActivityForm {
    pub activity_at: Option<DateTime<Utc>>,
    pub client_id: Option<i64>,
    pub contact_person: Option<String>,
    pub contact_method: Option<ContactMethod>,
    pub direction: Option<Direction>,
    pub subject: String,
    pub details: Option<String>,
    pub action_taken: Option<String>,
    pub status: Option<ActivityStatus>,
    pub priority: Option<Priority>,
    pub follow_up_at: Option<DateTime<Utc>>,
    pub assignee_id: Option<i64>,
}

impl ActivityCommandService {
    /// Validate the form and resolve client and assignee snapshots.
    /// `activity_at` defaults to `fallback_at` when not supplied.
    pub(super) async fn build_draft(
        &self,
        form: ActivityForm,
        fallback_at: DateTime<Utc>,
    ) -> ApplicationResult<ActivityDraft> {
        let client_id = form
            .client_id
            .ok_or_else(|| ApplicationError::validation("client is required"))?;
        let subject = Subject::new(form.subject)?;

        let client = self.resolve_client(ClientId::new(client_id)?).await?;
        let assignee = match form.assignee_id {
            Some(raw) => Some(self.resolve_assignee(UserId::new(raw)?).await?),
            None => None,
        };

        Ok(ActivityDraft {
            activity_at: form.activity_at.unwrap_or(fallback_at),
            client,
            contact_person: optional_text(form.contact_person),
            contact_method: form.contact_method.unwrap_or_default(),
            direction: form.direction.unwrap_or_default(),
            subject,
            details: optional_text(form.details),
            action_taken: optional_text(form.action_taken),
            status: form.status.unwrap_or_default(),
            priority: form.priority.unwrap_or_default(),
            follow_up_at: form.follow_up_at,
            assignee,
        })
    }

    async fn resolve_client(&self, id: ClientId) -> ApplicationResult<ClientSnapshot> {
        self.client_repo
            .find_by_id(id)
            .await?
            .map(|client| ClientSnapshot::from(&client))
            .ok_or_else(|| ApplicationError::validation(format!("client {} does not exist", id.0)))
    }

    async fn resolve_assignee(&self, id: UserId) -> ApplicationResult<UserSnapshot> {
        self.user_repo
            .find_by_id(id)
            .await?
            .map(|user| UserSnapshot::from(&user))
            .ok_or_else(|| ApplicationError::validation(format!("user {} does not exist", id.0)))
    }
}

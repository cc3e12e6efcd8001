use super::UserQueryService;
use crate::application::{
    commands::capability::ensure_capability,
    dto::{AuthenticatedUser, StaffMemberDto},
    error::ApplicationResult,
};

impl UserQueryService {
    /// Staff for assignee pickers, ordered by user name.
    pub async fn list_staff(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<StaffMemberDto>> {
        ensure_capability(actor, "users", "read")?;

        let users = self.user_repo.list_by_name().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}

use std::sync::Arc;

use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, DashboardDto, StatusCountDto},
        error::ApplicationResult,
    },
    domain::activity::{ActivityQuery, ActivityRepository, ActivityStatus, Condition},
};

pub const MY_ACTIVITIES_LIMIT: u32 = 10;
pub const RECENT_ACTIVITIES_LIMIT: u32 = 5;

pub struct DashboardQueryService {
    activity_repo: Arc<dyn ActivityRepository>,
}

impl DashboardQueryService {
    pub fn new(activity_repo: Arc<dyn ActivityRepository>) -> Self {
        Self { activity_repo }
    }

    pub async fn summary(&self, actor: &AuthenticatedUser) -> ApplicationResult<DashboardDto> {
        ensure_capability(actor, "activities", "read")?;

        let total_activities = self.activity_repo.count().await?;
        let status_counts = self.status_counts().await?;

        // Resolved items are dropped after the limit, so fewer than ten may show.
        let mine = ActivityQuery::newest_first()
            .with_condition(Condition::AssigneeIs(actor.id))
            .with_limit(MY_ACTIVITIES_LIMIT);
        let my_activities = self
            .activity_repo
            .query(&mine)
            .await?
            .into_iter()
            .filter(|activity| !activity.is_resolved())
            .map(Into::into)
            .collect();

        let recent = ActivityQuery::newest_first().with_limit(RECENT_ACTIVITIES_LIMIT);
        let recent_activities = self
            .activity_repo
            .query(&recent)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(DashboardDto {
            total_activities,
            status_counts,
            my_activities,
            recent_activities,
        })
    }

    async fn status_counts(&self) -> ApplicationResult<Vec<StatusCountDto>> {
        let counts = self.activity_repo.count_by_status().await?;
        Ok(ActivityStatus::DASHBOARD_ORDER
            .iter()
            .filter_map(|status| {
                counts
                    .iter()
                    .find(|(candidate, _)| candidate == status)
                    .filter(|(_, count)| *count > 0)
                    .map(|(_, count)| StatusCountDto {
                        status: *status,
                        tone: status.tone(),
                        count: *count,
                    })
            })
            .collect())
    }
}

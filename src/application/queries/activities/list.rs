use super::ActivityQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ActivityDto, ActivityListDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        activity::{
            ActivityFilter, ActivityStatus, ContactMethod, DateRangePreset, Keyword, SortSpec,
        },
        client::ClientId,
        user::UserId,
    },
};
use chrono::NaiveDate;

/// Filter-bar state. A preset, when given, replaces both dates.
#[derive(Debug, Clone, Default)]
pub struct ListActivitiesQuery {
    pub client_id: Option<i64>,
    pub status: Option<ActivityStatus>,
    pub contact_method: Option<ContactMethod>,
    pub assignee_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub preset: Option<DateRangePreset>,
    pub keyword: Option<String>,
    pub sort: SortSpec,
}

impl ActivityQueryService {
    pub async fn list_activities(
        &self,
        actor: &AuthenticatedUser,
        query: ListActivitiesQuery,
    ) -> ApplicationResult<ActivityListDto> {
        ensure_capability(actor, "activities", "read")?;

        let (date_from, date_to) = match query.preset {
            Some(preset) => {
                let range = self.resolve_preset(preset)?;
                (Some(range.date_from), Some(range.date_to))
            }
            None => (query.date_from, query.date_to),
        };

        let filter = ActivityFilter {
            client_id: query.client_id.map(ClientId::new).transpose()?,
            status: query.status,
            contact_method: query.contact_method,
            assignee_id: query.assignee_id.map(UserId::new).transpose()?,
            date_from,
            date_to,
            keyword: Keyword::parse(query.keyword.as_deref()),
            sort: query.sort,
        };
        let store_query = filter.to_query(self.office_time.offset())?;

        let activities = filter.narrow(self.activity_repo.query(&store_query).await?);

        tracing::debug!(
            conditions = store_query.conditions.len(),
            matched = activities.len(),
            "listed activities"
        );

        let items: Vec<ActivityDto> = activities.into_iter().map(Into::into).collect();
        Ok(ActivityListDto {
            total: items.len(),
            items,
            preset: query.preset,
            date_from,
            date_to,
        })
    }
}

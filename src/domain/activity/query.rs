//! Translation of activity-list filters into a store query.
//!
//! An [`ActivityFilter`] is what a user picks in the filter bar. It is turned
//! into an [`ActivityQuery`]: a list of equality / range conditions plus an
//! ordered list of sort clauses. Stores either translate the query to SQL or
//! evaluate it in memory with [`ActivityQuery::apply`]; both must agree.

use crate::domain::activity::{
    entity::Activity,
    keyword::Keyword,
    value_objects::{ActivityStatus, ContactMethod},
};
use crate::domain::client::ClientId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    #[serde(alias = "activityTimestamp")]
    ActivityAt,
    #[serde(alias = "clientName")]
    ClientName,
    Status,
    Priority,
    #[serde(alias = "lastModifiedAt")]
    LastModifiedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Columns a query may be ordered by. `Id` is only used as the final
/// tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    ActivityAt,
    ClientName,
    Status,
    Priority,
    LastModifiedAt,
    Id,
}

impl From<SortField> for OrderField {
    fn from(value: SortField) -> Self {
        match value {
            SortField::ActivityAt => OrderField::ActivityAt,
            SortField::ClientName => OrderField::ClientName,
            SortField::Status => OrderField::Status,
            SortField::Priority => OrderField::Priority,
            SortField::LastModifiedAt => OrderField::LastModifiedAt,
        }
    }
}

impl OrderField {
    fn compare(self, a: &Activity, b: &Activity) -> Ordering {
        match self {
            OrderField::ActivityAt => a.activity_at.cmp(&b.activity_at),
            OrderField::ClientName => a
                .client
                .name
                .to_lowercase()
                .cmp(&b.client.name.to_lowercase()),
            OrderField::Status => a.status.as_str().cmp(b.status.as_str()),
            OrderField::Priority => a.priority.rank().cmp(&b.priority.rank()),
            OrderField::LastModifiedAt => a.last_modified_at.cmp(&b.last_modified_at),
            OrderField::Id => a.id.cmp(&b.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderClause {
    pub field: OrderField,
    pub direction: SortDirection,
}

impl OrderClause {
    pub fn new(field: OrderField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    ClientIs(ClientId),
    StatusIs(ActivityStatus),
    ContactMethodIs(ContactMethod),
    AssigneeIs(UserId),
    /// `activity_at >= bound`
    ActivityAtFrom(DateTime<Utc>),
    /// `activity_at < bound`
    ActivityAtBefore(DateTime<Utc>),
}

impl Condition {
    pub fn matches(&self, activity: &Activity) -> bool {
        match self {
            Condition::ClientIs(id) => activity.client.id == *id,
            Condition::StatusIs(status) => activity.status == *status,
            Condition::ContactMethodIs(method) => activity.contact_method == *method,
            Condition::AssigneeIs(user_id) => activity.is_assigned_to(*user_id),
            Condition::ActivityAtFrom(bound) => activity.activity_at >= *bound,
            Condition::ActivityAtBefore(bound) => activity.activity_at < *bound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    pub conditions: Vec<Condition>,
    pub order: Vec<OrderClause>,
    pub limit: Option<u32>,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self::newest_first()
    }
}

impl ActivityQuery {
    /// Every activity, most recent first.
    pub fn newest_first() -> Self {
        Self {
            conditions: Vec::new(),
            order: vec![
                OrderClause::new(OrderField::ActivityAt, SortDirection::Desc),
                OrderClause::new(OrderField::Id, SortDirection::Desc),
            ],
            limit: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.conditions.iter().all(|c| c.matches(activity))
    }

    pub fn compare(&self, a: &Activity, b: &Activity) -> Ordering {
        self.order
            .iter()
            .map(|clause| clause.direction.orient(clause.field.compare(a, b)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Evaluate the query over an in-memory collection.
    pub fn apply(&self, items: impl IntoIterator<Item = Activity>) -> Vec<Activity> {
        let mut selected: Vec<Activity> = items.into_iter().filter(|a| self.matches(a)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            selected.truncate(limit as usize);
        }
        selected
    }
}

/// Filter-bar state for the activity list. Dates are calendar days in the
/// office time zone; both ends are inclusive. The keyword is not part of the
/// store query and is applied to its result with [`ActivityFilter::narrow`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub client_id: Option<ClientId>,
    pub status: Option<ActivityStatus>,
    pub contact_method: Option<ContactMethod>,
    pub assignee_id: Option<UserId>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub keyword: Option<Keyword>,
    pub sort: SortSpec,
}

impl ActivityFilter {
    pub fn narrow(&self, activities: Vec<Activity>) -> Vec<Activity> {
        match &self.keyword {
            Some(keyword) => keyword.retain(activities),
            None => activities,
        }
    }

    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    pub fn to_query(&self, office: FixedOffset) -> DomainResult<ActivityQuery> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(DomainError::validation(
                    "date_from must not be after date_to",
                ));
            }
        }

        let mut conditions = Vec::new();
        if let Some(id) = self.client_id {
            conditions.push(Condition::ClientIs(id));
        }
        if let Some(status) = self.status {
            conditions.push(Condition::StatusIs(status));
        }
        if let Some(method) = self.contact_method {
            conditions.push(Condition::ContactMethodIs(method));
        }
        if let Some(user_id) = self.assignee_id {
            conditions.push(Condition::AssigneeIs(user_id));
        }
        if let Some(from) = self.date_from {
            conditions.push(Condition::ActivityAtFrom(start_of_day(from, office)?));
        }
        if let Some(to) = self.date_to {
            conditions.push(Condition::ActivityAtBefore(end_of_day(to, office)?));
        }

        Ok(ActivityQuery {
            conditions,
            order: self.order_clauses(),
            limit: None,
        })
    }

    /// A range on `activity_at` forces it to lead the ordering; the requested
    /// field then breaks ties. Without a range the requested field leads and
    /// the activity time breaks ties, newest first.
    fn order_clauses(&self) -> Vec<OrderClause> {
        let SortSpec { field, direction } = self.sort;
        let by_time = field == SortField::ActivityAt;
        let mut order = Vec::with_capacity(3);

        if self.has_date_range() {
            let time_direction = if by_time { direction } else { SortDirection::Desc };
            order.push(OrderClause::new(OrderField::ActivityAt, time_direction));
            if !by_time {
                order.push(OrderClause::new(field.into(), direction));
            }
        } else {
            order.push(OrderClause::new(field.into(), direction));
            if !by_time {
                order.push(OrderClause::new(OrderField::ActivityAt, SortDirection::Desc));
            }
        }

        order.push(OrderClause::new(OrderField::Id, SortDirection::Desc));
        order
    }
}

/// First instant of `date` in the office time zone.
pub fn start_of_day(date: NaiveDate, office: FixedOffset) -> DomainResult<DateTime<Utc>> {
    let local = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DomainError::validation("date out of range"))?;
    to_utc(local, office)
}

/// Exclusive end of `date` in the office time zone: the first instant of the
/// following day.
pub fn end_of_day(date: NaiveDate, office: FixedOffset) -> DomainResult<DateTime<Utc>> {
    let next = date
        .succ_opt()
        .ok_or_else(|| DomainError::validation("date out of range"))?;
    start_of_day(next, office)
}

fn to_utc(local: chrono::NaiveDateTime, office: FixedOffset) -> DomainResult<DateTime<Utc>> {
    office
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DomainError::validation("date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::entity::{ClientSnapshot, UserSnapshot};
    use crate::domain::activity::value_objects::{ActivityId, Direction, Priority, Subject};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity(id: i64, client: &str, at: &str, status: ActivityStatus, priority: Priority) -> Activity {
        let activity_at = DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc);
        Activity {
            id: ActivityId::new(id).unwrap(),
            activity_at,
            client: ClientSnapshot {
                id: ClientId::new(id % 2 + 1).unwrap(),
                name: client.into(),
            },
            contact_person: None,
            contact_method: ContactMethod::Phone,
            direction: Direction::Incoming,
            subject: Subject::new(format!("subject {id}")).unwrap(),
            details: None,
            action_taken: None,
            status,
            priority,
            follow_up_at: None,
            assignee: Some(UserSnapshot {
                id: UserId::new(1).unwrap(),
                name: "Jane".into(),
            }),
            created_at: activity_at,
            created_by: None,
            last_modified_at: activity_at,
            modified_by: None,
        }
    }

    #[test]
    fn default_filter_orders_newest_first() {
        let query = ActivityFilter::default().to_query(utc()).unwrap();
        assert!(query.conditions.is_empty());
        assert_eq!(query, ActivityQuery::newest_first());
    }

    #[test]
    fn equality_conditions_follow_filter_bar_order() {
        let filter = ActivityFilter {
            client_id: Some(ClientId::new(3).unwrap()),
            status: Some(ActivityStatus::Open),
            contact_method: Some(ContactMethod::Email),
            assignee_id: Some(UserId::new(9).unwrap()),
            ..ActivityFilter::default()
        };
        let query = filter.to_query(utc()).unwrap();
        assert_eq!(
            query.conditions,
            vec![
                Condition::ClientIs(ClientId::new(3).unwrap()),
                Condition::StatusIs(ActivityStatus::Open),
                Condition::ContactMethodIs(ContactMethod::Email),
                Condition::AssigneeIs(UserId::new(9).unwrap()),
            ]
        );
    }

    #[test]
    fn date_range_covers_whole_days_in_office_time() {
        let office = FixedOffset::east_opt(2 * 3600).unwrap();
        let filter = ActivityFilter {
            date_from: Some(date(2024, 5, 1)),
            date_to: Some(date(2024, 5, 1)),
            ..ActivityFilter::default()
        };
        let query = filter.to_query(office).unwrap();
        let from = DateTime::parse_from_rfc3339("2024-04-30T22:00:00Z").unwrap().with_timezone(&Utc);
        let to = DateTime::parse_from_rfc3339("2024-05-01T22:00:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(
            query.conditions,
            vec![Condition::ActivityAtFrom(from), Condition::ActivityAtBefore(to)]
        );
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filter = ActivityFilter {
            date_from: Some(date(2024, 5, 2)),
            date_to: Some(date(2024, 5, 1)),
            ..ActivityFilter::default()
        };
        assert!(matches!(filter.to_query(utc()), Err(DomainError::Validation(_))));
    }

    #[test]
    fn date_range_puts_activity_time_first() {
        let filter = ActivityFilter {
            date_from: Some(date(2024, 5, 1)),
            sort: SortSpec {
                field: SortField::ClientName,
                direction: SortDirection::Asc,
            },
            ..ActivityFilter::default()
        };
        let query = filter.to_query(utc()).unwrap();
        assert_eq!(
            query.order,
            vec![
                OrderClause::new(OrderField::ActivityAt, SortDirection::Desc),
                OrderClause::new(OrderField::ClientName, SortDirection::Asc),
                OrderClause::new(OrderField::Id, SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn date_range_keeps_requested_direction_when_sorting_by_time() {
        let filter = ActivityFilter {
            date_to: Some(date(2024, 5, 1)),
            sort: SortSpec {
                field: SortField::ActivityAt,
                direction: SortDirection::Asc,
            },
            ..ActivityFilter::default()
        };
        let query = filter.to_query(utc()).unwrap();
        assert_eq!(
            query.order,
            vec![
                OrderClause::new(OrderField::ActivityAt, SortDirection::Asc),
                OrderClause::new(OrderField::Id, SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn without_range_requested_field_leads() {
        let filter = ActivityFilter {
            sort: SortSpec {
                field: SortField::Priority,
                direction: SortDirection::Desc,
            },
            ..ActivityFilter::default()
        };
        let query = filter.to_query(utc()).unwrap();
        assert_eq!(
            query.order,
            vec![
                OrderClause::new(OrderField::Priority, SortDirection::Desc),
                OrderClause::new(OrderField::ActivityAt, SortDirection::Desc),
                OrderClause::new(OrderField::Id, SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn apply_filters_sorts_and_limits() {
        let items = vec![
            activity(1, "Acme", "2024-05-01T09:00:00Z", ActivityStatus::Open, Priority::Low),
            activity(2, "beta", "2024-05-02T09:00:00Z", ActivityStatus::Open, Priority::High),
            activity(3, "Cobalt", "2024-05-03T09:00:00Z", ActivityStatus::Resolved, Priority::High),
            activity(4, "Delta", "2024-05-04T09:00:00Z", ActivityStatus::Open, Priority::Medium),
        ];

        let filter = ActivityFilter {
            status: Some(ActivityStatus::Open),
            sort: SortSpec {
                field: SortField::Priority,
                direction: SortDirection::Desc,
            },
            ..ActivityFilter::default()
        };
        let ids: Vec<i64> = filter
            .to_query(utc())
            .unwrap()
            .apply(items.clone())
            .iter()
            .map(|a| a.id.0)
            .collect();
        assert_eq!(ids, vec![2, 4, 1]);

        let by_name = ActivityFilter {
            sort: SortSpec {
                field: SortField::ClientName,
                direction: SortDirection::Asc,
            },
            ..ActivityFilter::default()
        };
        let ids: Vec<i64> = by_name
            .to_query(utc())
            .unwrap()
            .with_limit(2)
            .apply(items)
            .iter()
            .map(|a| a.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let items = vec![
            activity(1, "Acme", "2024-05-01T00:00:00Z", ActivityStatus::Open, Priority::Low),
            activity(2, "Acme", "2024-05-01T23:59:59.999Z", ActivityStatus::Open, Priority::Low),
            activity(3, "Acme", "2024-05-02T00:00:00Z", ActivityStatus::Open, Priority::Low),
        ];
        let filter = ActivityFilter {
            date_from: Some(date(2024, 5, 1)),
            date_to: Some(date(2024, 5, 1)),
            ..ActivityFilter::default()
        };
        let ids: Vec<i64> = filter
            .to_query(utc())
            .unwrap()
            .apply(items)
            .iter()
            .map(|a| a.id.0)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn sub_millisecond_instants_land_in_exactly_one_day() {
        let late = activity(1, "Acme", "2024-05-01T23:59:59.999500Z", ActivityStatus::Open, Priority::Low);
        let day = |d: u32| ActivityFilter {
            date_from: Some(date(2024, 5, d)),
            date_to: Some(date(2024, 5, d)),
            ..ActivityFilter::default()
        };
        let first = day(1).to_query(utc()).unwrap();
        let second = day(2).to_query(utc()).unwrap();
        assert!(first.matches(&late));
        assert!(!second.matches(&late));
    }

    #[test]
    fn keyword_narrows_the_store_result_only() {
        let filter = ActivityFilter {
            keyword: Keyword::parse(Some("cobalt")),
            ..ActivityFilter::default()
        };
        let query = filter.to_query(utc()).unwrap();
        assert_eq!(query, ActivityQuery::newest_first());

        let items = vec![
            activity(1, "Acme", "2024-05-01T09:00:00Z", ActivityStatus::Open, Priority::Low),
            activity(2, "Cobalt", "2024-05-02T09:00:00Z", ActivityStatus::Open, Priority::Low),
        ];
        let ids: Vec<i64> = filter.narrow(query.apply(items)).iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![2]);
    }
}

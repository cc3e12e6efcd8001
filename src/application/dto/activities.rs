use crate::domain::activity::{
    Activity, ActivityStatus, ClientSnapshot, ContactMethod, DateRange, DateRangePreset,
    Direction, Priority, StatusTone, UserSnapshot,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// Id and display name captured at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedRefDto {
    pub id: i64,
    pub name: String,
}

impl From<ClientSnapshot> for NamedRefDto {
    fn from(value: ClientSnapshot) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
        }
    }
}

impl From<UserSnapshot> for NamedRefDto {
    fn from(value: UserSnapshot) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    pub id: i64,
    #[serde(with = "serde_time")]
    pub activity_at: DateTime<Utc>,
    pub client: NamedRefDto,
    pub contact_person: Option<String>,
    pub contact_method: ContactMethod,
    pub direction: Direction,
    pub subject: String,
    pub details: Option<String>,
    pub action_taken: Option<String>,
    pub status: ActivityStatus,
    pub status_tone: StatusTone,
    pub priority: Priority,
    #[serde(default, with = "serde_time::option")]
    pub follow_up_at: Option<DateTime<Utc>>,
    pub assignee: Option<NamedRefDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    pub created_by: Option<NamedRefDto>,
    #[serde(with = "serde_time")]
    pub last_modified_at: DateTime<Utc>,
    pub modified_by: Option<NamedRefDto>,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id.into(),
            activity_at: activity.activity_at,
            client: activity.client.into(),
            contact_person: activity.contact_person,
            contact_method: activity.contact_method,
            direction: activity.direction,
            subject: activity.subject.into(),
            details: activity.details,
            action_taken: activity.action_taken,
            status: activity.status,
            status_tone: activity.status.tone(),
            priority: activity.priority,
            follow_up_at: activity.follow_up_at,
            assignee: activity.assignee.map(Into::into),
            created_at: activity.created_at,
            created_by: activity.created_by.map(Into::into),
            last_modified_at: activity.last_modified_at,
            modified_by: activity.modified_by.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRangeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<DateRangePreset>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl DateRangeDto {
    pub fn from_preset(preset: DateRangePreset, range: DateRange) -> Self {
        Self {
            preset: Some(preset),
            date_from: range.from,
            date_to: range.to,
        }
    }
}

/// One page of the activity log plus the date bounds actually applied.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityListDto {
    pub items: Vec<ActivityDto>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<DateRangePreset>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

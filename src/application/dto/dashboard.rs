use crate::domain::activity::{ActivityStatus, StatusTone};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::activities::ActivityDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: ActivityStatus,
    pub tone: StatusTone,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total_activities: u64,
    /// Non-zero counts only, in dashboard card order.
    pub status_counts: Vec<StatusCountDto>,
    /// Unresolved work assigned to the caller, newest first.
    pub my_activities: Vec<ActivityDto>,
    pub recent_activities: Vec<ActivityDto>,
}

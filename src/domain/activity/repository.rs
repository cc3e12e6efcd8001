use crate::domain::activity::{
    entity::{Activity, ActivityUpdate, NewActivity},
    query::ActivityQuery,
    value_objects::{ActivityId, ActivityStatus},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert(&self, activity: NewActivity) -> DomainResult<Activity>;

    /// Fails with `NotFound` when the id does not exist.
    async fn update(&self, update: ActivityUpdate) -> DomainResult<Activity>;

    /// Returns `false` when no row matched.
    async fn delete(&self, id: ActivityId) -> DomainResult<bool>;

    async fn find_by_id(&self, id: ActivityId) -> DomainResult<Option<Activity>>;

    async fn query(&self, query: &ActivityQuery) -> DomainResult<Vec<Activity>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Only statuses with at least one activity are returned.
    async fn count_by_status(&self) -> DomainResult<Vec<(ActivityStatus, u64)>>;
}

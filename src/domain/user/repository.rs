use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::{Email, UserId},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// All accounts ordered by user name, ascending.
    async fn list_by_name(&self) -> DomainResult<Vec<User>>;
}

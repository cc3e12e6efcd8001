use crate::domain::user::value_objects::{Email, PasswordHash, Role, UserId, UserName};
use chrono::{DateTime, Utc};

/// A staff account. Profiles are read-only once registered.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub user_name: UserName,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub user_name: UserName,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

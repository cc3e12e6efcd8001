use crate::domain::activity::UserSnapshot;
use crate::domain::user::{Capability, Role, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    #[serde(with = "serde_time")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub user_name: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }

    /// Stamp recorded on activities this user creates or edits.
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            name: self.user_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub user_name: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            user_name: user.user_name.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        }
    }
}

use crate::domain::user::{Capability, Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{auth::AuthenticatedUser, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub role: Role,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.into(),
            user_name: user.user_name.into(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Entry in assignee pickers and filter dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffMemberDto {
    pub id: i64,
    pub user_name: String,
}

impl From<User> for StaffMemberDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            user_name: user.user_name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapabilityView {
    pub resource: String,
    pub action: String,
}

impl From<Capability> for CapabilityView {
    fn from(value: Capability) -> Self {
        Self {
            resource: value.resource,
            action: value.action,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub capabilities: Vec<CapabilityView>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl UserProfileDto {
    pub fn from_parts(user: User, auth: &AuthenticatedUser, now: DateTime<Utc>) -> Self {
        let mut capabilities: Vec<_> = auth
            .capabilities
            .iter()
            .cloned()
            .map(CapabilityView::from)
            .collect();
        capabilities.sort_by(|a, b| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.action.cmp(&b.action))
        });
        let expires_in = auth
            .expires_at
            .signed_duration_since(now)
            .num_seconds()
            .max(0);

        Self {
            user: user.into(),
            capabilities,
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}

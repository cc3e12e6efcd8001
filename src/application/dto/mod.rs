pub mod activities;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod serde_time;
pub mod users;

pub use activities::{ActivityDto, ActivityListDto, DateRangeDto, NamedRefDto};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use clients::ClientDto;
pub use dashboard::{DashboardDto, StatusCountDto};
pub use users::{CapabilityView, StaffMemberDto, UserDto, UserProfileDto};

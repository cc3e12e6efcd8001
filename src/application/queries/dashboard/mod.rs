mod service;

pub use service::{DashboardQueryService, MY_ACTIVITIES_LIMIT, RECENT_ACTIVITIES_LIMIT};

mod get;
mod list;
mod presets;
mod service;

pub use list::ListActivitiesQuery;
pub use service::ActivityQueryService;

mod delete;
mod form;
mod log;
mod service;
mod update;

pub use delete::DeleteActivityCommand;
pub use form::ActivityForm;
pub use log::LogActivityCommand;
pub use service::ActivityCommandService;
pub use update::UpdateActivityCommand;

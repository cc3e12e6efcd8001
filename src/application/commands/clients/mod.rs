mod create;
mod delete;
mod service;
mod update;

pub use create::{ClientFields, CreateClientCommand};
pub use delete::DeleteClientCommand;
pub use service::ClientCommandService;
pub use update::UpdateClientCommand;

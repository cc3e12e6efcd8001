pub mod activities;
pub(crate) mod capability;
pub mod clients;
pub mod users;

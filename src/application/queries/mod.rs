pub mod activities;
pub mod clients;
pub mod dashboard;
pub mod users;

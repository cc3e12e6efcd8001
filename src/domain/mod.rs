pub mod activity;
pub mod client;
pub mod errors;
pub mod events;
pub mod user;

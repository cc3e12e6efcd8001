pub mod change_feed;
pub mod database;
pub mod repositories;
pub mod security;
pub mod time;

pub mod change_feed;
pub mod security;
pub mod time;

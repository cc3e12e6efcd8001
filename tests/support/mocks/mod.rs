// tests/support/mocks/mod.rs
pub mod repos;
pub mod security;
pub mod time;

pub use repos::{InMemoryActivityRepo, InMemoryClientRepo, InMemoryUserRepo};
pub use security::{EXPIRING_PREFIX, PlainPasswordHasher, READ_ONLY_PREFIX, TestTokenManager};
pub use time::{FixedClock, fixed_now};

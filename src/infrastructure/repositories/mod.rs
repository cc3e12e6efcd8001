mod error;
mod postgres_activity;
mod postgres_client;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_activity::PostgresActivityRepository;
pub use postgres_client::PostgresClientRepository;
pub use postgres_user::PostgresUserRepository;

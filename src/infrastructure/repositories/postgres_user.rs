use super::{error::corrupt, map_sqlx};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{Email, NewUser, PasswordHash, User, UserId, UserName, UserRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str = "id, email, user_name, password_hash, role, created_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    user_name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            email: Email::new(row.email)?,
            user_name: UserName::new(row.user_name)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse().map_err(|err| corrupt("role", err))?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            email,
            user_name,
            password_hash,
            role,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, user_name, password_hash, role, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(user_name.as_str())
        .bind(password_hash.as_str())
        .bind(role.as_str())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn list_by_name(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY LOWER(user_name) ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }
}

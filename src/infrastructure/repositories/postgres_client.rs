use super::map_sqlx;
use crate::domain::client::{
    Client, ClientContact, ClientId, ClientName, ClientRepository, ClientUpdate, NewClient,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const CLIENT_COLUMNS: &str =
    "id, name, contact_person, email, phone, notes, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    contact_person: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = DomainError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Client {
            id: ClientId::new(row.id)?,
            name: ClientName::new(row.name)?,
            contact: ClientContact {
                name: row.contact_person,
                email: row.email,
                phone: row.phone,
            },
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn insert(&self, client: NewClient) -> DomainResult<Client> {
        let NewClient {
            name,
            contact,
            notes,
            created_at,
        } = client;

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "INSERT INTO clients (name, contact_person, email, phone, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(contact.name)
        .bind(contact.email)
        .bind(contact.phone)
        .bind(notes)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Client::try_from(row)
    }

    async fn update(&self, update: ClientUpdate) -> DomainResult<Client> {
        let ClientUpdate {
            id,
            name,
            contact,
            notes,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "UPDATE clients
             SET name = $2, contact_person = $3, email = $4, phone = $5, notes = $6, updated_at = $7
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(name.as_str())
        .bind(contact.name)
        .bind(contact.email)
        .bind(contact.phone)
        .bind(notes)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::not_found("client not found"))?;

        Client::try_from(row)
    }

    async fn delete(&self, id: ClientId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: ClientId) -> DomainResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Client::try_from).transpose()
    }

    async fn list_by_name(&self) -> DomainResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY LOWER(name) ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Client::try_from).collect()
    }
}

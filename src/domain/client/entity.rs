use crate::domain::client::value_objects::{ClientId, ClientName};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub contact: ClientContact,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: ClientName,
    pub contact: ClientContact,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of the editable fields; `created_at` is never touched.
#[derive(Debug, Clone)]
pub struct ClientUpdate {
    pub id: ClientId,
    pub name: ClientName,
    pub contact: ClientContact,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

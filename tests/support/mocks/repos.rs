// tests/support/mocks/repos.rs
use async_trait::async_trait;
use office_activity_tracker::domain::activity::{
    Activity, ActivityId, ActivityQuery, ActivityRepository, ActivityStatus, ActivityUpdate,
    NewActivity,
};
use office_activity_tracker::domain::client::{
    Client, ClientId, ClientRepository, ClientUpdate, NewClient,
};
use office_activity_tracker::domain::errors::{DomainError, DomainResult};
use office_activity_tracker::domain::user::{Email, NewUser, User, UserId, UserRepository};
use std::sync::Mutex;

/// Rows plus the next id to hand out.
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    table: Mutex<Table<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.table.lock().unwrap().rows.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut table = self.table.lock().unwrap();
        if table.rows.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        let user = User {
            id: UserId::new(table.allocate())?,
            email: new_user.email,
            user_name: new_user.user_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: new_user.created_at,
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn list_by_name(&self) -> DomainResult<Vec<User>> {
        let mut users = self.table.lock().unwrap().rows.clone();
        users.sort_by_key(|u| u.user_name.as_str().to_lowercase());
        Ok(users)
    }
}

#[derive(Default)]
pub struct InMemoryClientRepo {
    table: Mutex<Table<Client>>,
}

#[async_trait]
impl ClientRepository for InMemoryClientRepo {
    async fn insert(&self, client: NewClient) -> DomainResult<Client> {
        let mut table = self.table.lock().unwrap();
        let stored = Client {
            id: ClientId::new(table.allocate())?,
            name: client.name,
            contact: client.contact,
            notes: client.notes,
            created_at: client.created_at,
            updated_at: client.created_at,
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ClientUpdate) -> DomainResult<Client> {
        let mut table = self.table.lock().unwrap();
        let client = table
            .rows
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::not_found("client not found"))?;
        client.name = update.name;
        client.contact = update.contact;
        client.notes = update.notes;
        client.updated_at = update.updated_at;
        Ok(client.clone())
    }

    async fn delete(&self, id: ClientId) -> DomainResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|c| c.id != id);
        Ok(table.rows.len() < before)
    }

    async fn find_by_id(&self, id: ClientId) -> DomainResult<Option<Client>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_name(&self) -> DomainResult<Vec<Client>> {
        let mut clients = self.table.lock().unwrap().rows.clone();
        clients.sort_by_key(|c| c.name.as_str().to_lowercase());
        Ok(clients)
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepo {
    table: Mutex<Table<Activity>>,
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepo {
    async fn insert(&self, activity: NewActivity) -> DomainResult<Activity> {
        let mut table = self.table.lock().unwrap();
        let stored = activity.into_activity(ActivityId::new(table.allocate())?);
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ActivityUpdate) -> DomainResult<Activity> {
        let mut table = self.table.lock().unwrap();
        let activity = table
            .rows
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::not_found("activity not found"))?;
        update.apply_to(activity);
        Ok(activity.clone())
    }

    async fn delete(&self, id: ActivityId) -> DomainResult<bool> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);
        Ok(table.rows.len() < before)
    }

    async fn find_by_id(&self, id: ActivityId) -> DomainResult<Option<Activity>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn query(&self, query: &ActivityQuery) -> DomainResult<Vec<Activity>> {
        let rows = self.table.lock().unwrap().rows.clone();
        Ok(query.apply(rows))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.table.lock().unwrap().rows.len() as u64)
    }

    async fn count_by_status(&self) -> DomainResult<Vec<(ActivityStatus, u64)>> {
        let table = self.table.lock().unwrap();
        Ok(ActivityStatus::ALL
            .iter()
            .map(|status| {
                let count = table.rows.iter().filter(|a| a.status == *status).count();
                (*status, count as u64)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }
}

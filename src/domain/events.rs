use serde::Serialize;

/// Collections a live view can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Activities,
    Clients,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Emitted after a write has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub id: i64,
}

impl ChangeEvent {
    pub fn new(collection: Collection, kind: ChangeKind, id: impl Into<i64>) -> Self {
        Self {
            collection,
            kind,
            id: id.into(),
        }
    }

    /// Dashboard counts and lists are derived from activities only.
    pub fn touches(&self, collection: Collection) -> bool {
        self.collection == collection
    }
}

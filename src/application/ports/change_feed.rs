use crate::domain::events::ChangeEvent;
use tokio::sync::broadcast;

/// Fan-out of committed writes to live subscribers.
pub trait ChangeFeed: Send + Sync {
    /// Never fails; an event with no subscribers is dropped.
    fn publish(&self, event: ChangeEvent);
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

use crate::application::ports::change_feed::ChangeFeed;
use crate::domain::events::ChangeEvent;
use tokio::sync::broadcast;

pub const DEFAULT_CAPACITY: usize = 256;

/// In-process change feed on a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }
}

impl Default for BroadcastChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangeFeed for BroadcastChangeFeed {
    fn publish(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(?event, receivers, "published change"),
            Err(_) => tracing::debug!(?event, "no live subscribers for change"),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{ChangeKind, Collection};

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let feed = BroadcastChangeFeed::default();
        let mut rx = feed.subscribe();
        let event = ChangeEvent::new(Collection::Clients, ChangeKind::Created, 3);
        feed.publish(event);
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let feed = BroadcastChangeFeed::new(4);
        feed.publish(ChangeEvent::new(Collection::Users, ChangeKind::Created, 1));
    }
}

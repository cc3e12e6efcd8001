use std::sync::Arc;

use crate::{
    application::ports::{change_feed::ChangeFeed, time::Clock},
    domain::{
        client::{ClientId, ClientRepository},
        events::{ChangeEvent, ChangeKind, Collection},
    },
};

pub struct ClientCommandService {
    pub(super) client_repo: Arc<dyn ClientRepository>,
    pub(super) change_feed: Arc<dyn ChangeFeed>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ClientCommandService {
    pub fn new(
        client_repo: Arc<dyn ClientRepository>,
        change_feed: Arc<dyn ChangeFeed>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client_repo,
            change_feed,
            clock,
        }
    }

    pub(super) fn notify(&self, kind: ChangeKind, id: ClientId) {
        self.change_feed
            .publish(ChangeEvent::new(Collection::Clients, kind, id));
    }
}

use std::sync::Arc;

use crate::{
    application::ports::{change_feed::ChangeFeed, time::Clock},
    domain::{
        activity::{ActivityId, ActivityRepository},
        client::ClientRepository,
        events::{ChangeEvent, ChangeKind, Collection},
        user::UserRepository,
    },
};

pub struct ActivityCommandService {
    pub(super) activity_repo: Arc<dyn ActivityRepository>,
    pub(super) client_repo: Arc<dyn ClientRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) change_feed: Arc<dyn ChangeFeed>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ActivityCommandService {
    pub fn new(
        activity_repo: Arc<dyn ActivityRepository>,
        client_repo: Arc<dyn ClientRepository>,
        user_repo: Arc<dyn UserRepository>,
        change_feed: Arc<dyn ChangeFeed>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            activity_repo,
            client_repo,
            user_repo,
            change_feed,
            clock,
        }
    }

    pub(super) fn notify(&self, kind: ChangeKind, id: ActivityId) {
        self.change_feed
            .publish(ChangeEvent::new(Collection::Activities, kind, id));
    }
}

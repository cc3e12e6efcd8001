use std::sync::Arc;

use crate::{
    application::ports::time::{Clock, OfficeTime},
    domain::activity::ActivityRepository,
};

pub struct ActivityQueryService {
    pub(super) activity_repo: Arc<dyn ActivityRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) office_time: OfficeTime,
}

impl ActivityQueryService {
    pub fn new(
        activity_repo: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
        office_time: OfficeTime,
    ) -> Self {
        Self {
            activity_repo,
            clock,
            office_time,
        }
    }
}

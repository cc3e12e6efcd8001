use crate::application::{dto::AuthenticatedUser, services::ApplicationServices};
use crate::presentation::http::live::{ShutdownSignal, StreamLimits};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub shutdown: ShutdownSignal,
}

impl HttpState {
    /// Limits for a live stream opened with `user`'s token.
    pub fn stream_limits(&self, user: &AuthenticatedUser) -> StreamLimits {
        StreamLimits::new(user.expires_at, self.services.clock(), self.shutdown.clone())
    }
}

//! Server-sent snapshot subscriptions.
//!
//! A subscriber gets the full result of its query on connect and again after
//! every committed change to the collection it watches. Bursts of changes are
//! coalesced into one re-query. A subscription ends when the bearer token it
//! was opened with expires (after a final `error` event) or when the server
//! starts shutting down.

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{change_feed::ChangeFeed, time::Clock},
};
use crate::domain::events::{ChangeEvent, Collection};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use std::{convert::Infallible, future::Future, sync::Arc, time::Duration};
use tokio::sync::{
    broadcast::{self, error::RecvError, error::TryRecvError},
    watch,
};

pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

pub type SnapshotStream = BoxStream<'static, Result<Event, Infallible>>;

pub type LiveResponse = Sse<KeepAliveStream<SnapshotStream>>;

/// Fires once the server begins a graceful shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (sender, receiver) = watch::channel(false);
        (sender, Self(receiver))
    }

    /// A dropped sender never fires.
    async fn requested(&mut self) {
        let fired = self.0.wait_for(|stopping| *stopping).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}

/// What ends a subscription besides the client going away.
#[derive(Clone)]
pub struct StreamLimits {
    expires_at: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    shutdown: ShutdownSignal,
}

impl StreamLimits {
    pub fn new(expires_at: DateTime<Utc>, clock: Arc<dyn Clock>, shutdown: ShutdownSignal) -> Self {
        Self {
            expires_at,
            clock,
            shutdown,
        }
    }

    fn remaining(&self) -> Option<Duration> {
        (self.expires_at - self.clock.now())
            .to_std()
            .ok()
            .filter(|left| !left.is_zero())
    }
}

enum Wake {
    Changed,
    Expired,
    Stop,
}

struct LiveState<F> {
    receiver: broadcast::Receiver<ChangeEvent>,
    limits: StreamLimits,
    load: F,
    pending: Option<Event>,
    finished: bool,
}

fn snapshot_event<T: Serialize>(data: &T) -> Event {
    Event::default()
        .event("snapshot")
        .json_data(data)
        .unwrap_or_else(|err| Event::default().event("error").data(err.to_string()))
}

fn error_event(err: &ApplicationError) -> Event {
    Event::default().event("error").data(err.message())
}

/// Resolves once something relevant changed. `None` means the feed is gone.
async fn wait_for_change(
    receiver: &mut broadcast::Receiver<ChangeEvent>,
    collection: Collection,
) -> Option<()> {
    loop {
        match receiver.recv().await {
            Ok(event) if event.touches(collection) => break,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, ?collection, "live subscriber lagged; resending snapshot");
                break;
            }
            Err(RecvError::Closed) => return None,
        }
    }

    // Fold whatever else is already queued into the same snapshot.
    loop {
        match receiver.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) => return Some(()),
            Err(TryRecvError::Closed) => return None,
        }
    }
}

async fn next_wake(
    receiver: &mut broadcast::Receiver<ChangeEvent>,
    collection: Collection,
    limits: &mut StreamLimits,
) -> Wake {
    let Some(left) = limits.remaining() else {
        return Wake::Expired;
    };

    tokio::select! {
        biased;
        () = limits.shutdown.requested() => Wake::Stop,
        () = tokio::time::sleep(left) => Wake::Expired,
        changed = wait_for_change(receiver, collection) => match changed {
            Some(()) => Wake::Changed,
            None => Wake::Stop,
        },
    }
}

/// Stream of snapshot events, starting with `initial`.
pub fn snapshot_stream<F, Fut, T>(
    receiver: broadcast::Receiver<ChangeEvent>,
    collection: Collection,
    limits: StreamLimits,
    initial: &T,
    load: F,
) -> SnapshotStream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApplicationResult<T>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let state = LiveState {
        receiver,
        limits,
        load,
        pending: Some(snapshot_event(initial)),
        finished: false,
    };

    stream::unfold(state, move |mut live| async move {
        if let Some(event) = live.pending.take() {
            return Some((Ok(event), live));
        }
        if live.finished {
            return None;
        }

        let event = match next_wake(&mut live.receiver, collection, &mut live.limits).await {
            Wake::Stop => return None,
            Wake::Expired => {
                tracing::debug!(?collection, "live subscriber token expired");
                live.finished = true;
                error_event(&ApplicationError::unauthorized("token expired"))
            }
            Wake::Changed => match (live.load)().await {
                Ok(data) => snapshot_event(&data),
                Err(err) => error_event(&err),
            },
        };
        Some((Ok(event), live))
    })
    .boxed()
}

/// Subscribe, load once and answer with an SSE response. Errors from the
/// first load are returned as ordinary HTTP errors.
pub async fn snapshot_sse<F, Fut, T>(
    feed: Arc<dyn ChangeFeed>,
    collection: Collection,
    limits: StreamLimits,
    load: F,
) -> HttpResult<LiveResponse>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApplicationResult<T>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let receiver = feed.subscribe();
    let initial = load().await.into_http()?;
    let stream = snapshot_stream(receiver, collection, limits, &initial, load);

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    ))
}

use crate::{ReloadBroadcaster, ShutdownCoordinator, StreamConfig};

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::{Stream, stream};

/// Shared state for the event-stream endpoint
#[derive(Clone)]
pub struct ReloadState {
    pub broadcaster: ReloadBroadcaster,
    pub shutdown: ShutdownCoordinator,
    pub config: StreamConfig,
}

/// Router serving the event stream at the configured path
pub fn router(state: ReloadState) -> Router {
    Router::new()
        .route(&state.config.path, get(event_stream))
        .with_state(state)
}

/// Server-Sent-Events handler.
///
/// Each reload event becomes one `data:` frame holding its JSON. A heartbeat
/// frame keeps idle connections open, and the stream ends on shutdown.
pub async fn event_stream(
    State(state): State<ReloadState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.broadcaster.subscribe();
    let guard = state.shutdown.subscribe_guard();

    log::info!(
        "Reload client connected ({} subscribers)",
        state.broadcaster.subscriber_count()
    );

    let events = stream::unfold(
        (subscription, guard),
        |(mut subscription, mut guard)| async move {
            loop {
                let next = tokio::select! {
                    event = subscription.recv() => event,
                    _ = guard.wait() => None,
                };
                let event = next?;

                match event.to_json() {
                    Ok(json) => {
                        log::debug!("Sending {} to reload client", event.event_type());
                        return Some((Ok(Event::default().data(json)), (subscription, guard)));
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
        },
    );

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(state.config.heartbeat)
            .text("\u{1f493}"),
    )
}

use crate::{BroadcastConfig, Publish, ReloadEvent};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

/// Fan-out hub for reload events.
///
/// One channel serves every connected browser. Events published while no
/// subscriber is connected are dropped.
#[derive(Clone)]
pub struct ReloadBroadcaster {
    sender: broadcast::Sender<ReloadEvent>,
    subscriber_count: Arc<AtomicUsize>,
}

/// A live subscription; the subscriber count drops with it.
pub struct ReloadSubscription {
    receiver: broadcast::Receiver<ReloadEvent>,
    subscriber_count: Arc<AtomicUsize>,
}

impl ReloadBroadcaster {
    pub fn new(config: BroadcastConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to reload events
    pub fn subscribe(&self) -> ReloadSubscription {
        let receiver = self.sender.subscribe();
        let total = self.subscriber_count.fetch_add(1, Ordering::SeqCst) + 1;

        log::debug!("Reload client subscribed ({} total subscribers)", total);

        ReloadSubscription {
            receiver,
            subscriber_count: Arc::clone(&self.subscriber_count),
        }
    }

    /// Send an event to every current subscriber, returning how many received it
    pub fn broadcast(&self, event: ReloadEvent) -> usize {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                log::debug!(
                    "Broadcast {} to {} reload clients",
                    event_type,
                    receiver_count
                );
                receiver_count
            }
            Err(_) => {
                log::debug!("Broadcast {} had no active receivers", event_type);
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for ReloadBroadcaster {
    fn default() -> Self {
        Self::new(BroadcastConfig::default())
    }
}

impl Publish for ReloadBroadcaster {
    fn publish(&self, event: ReloadEvent) {
        self.broadcast(event);
    }
}

impl ReloadSubscription {
    /// Next event, or `None` once the broadcaster is gone.
    ///
    /// A slow subscriber that lags behind skips the missed events and keeps
    /// going.
    pub async fn recv(&mut self) -> Option<ReloadEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Reload client lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for ReloadSubscription {
    fn drop(&mut self) {
        let remaining = self
            .subscriber_count
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        log::debug!(
            "Reload client unsubscribed ({} remaining subscribers)",
            remaining
        );
    }
}

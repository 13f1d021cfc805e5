use crate::{RestartStatus, RestartTracker};

use std::time::Duration;

use log::{debug, warn};

/// How a client build settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSettle {
    /// No restart was in flight
    Immediate,
    /// Waited for a restart to settle plus the settle delay
    AfterRestart(RestartStatus),
}

/// Holds client builds back while a server restart is in flight.
#[derive(Debug, Clone)]
pub struct ClientBuildGate {
    tracker: RestartTracker,
    settle_delay: Duration,
}

impl ClientBuildGate {
    pub fn new(tracker: RestartTracker, settle_delay: Duration) -> Self {
        Self {
            tracker,
            settle_delay,
        }
    }

    /// Resolve once the client build is safe to announce.
    ///
    /// A failed restart does not fail the client build; the settle delay is
    /// applied either way.
    pub async fn on_client_build_succeeded(&self) -> ClientSettle {
        let Some(ticket) = self.tracker.current() else {
            return ClientSettle::Immediate;
        };
        if ticket.is_settled() {
            return ClientSettle::Immediate;
        }

        debug!("Client build waiting on server restart #{}", ticket.id());
        let status = ticket.settled().await;
        if let RestartStatus::Failed { reason } = &status {
            warn!(
                "Server restart #{} failed ({reason}), settling client build anyway",
                ticket.id()
            );
        }

        tokio::time::sleep(self.settle_delay).await;
        ClientSettle::AfterRestart(status)
    }
}

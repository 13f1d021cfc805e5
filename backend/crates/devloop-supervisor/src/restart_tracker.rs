use crate::RestartStatus;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

/// Observer of one restart operation's outcome.
///
/// Cloning is cheap; every clone observes the same outcome.
#[derive(Debug, Clone)]
pub struct RestartTicket {
    id: u64,
    status_rx: watch::Receiver<RestartStatus>,
}

impl RestartTicket {
    /// Sequence number, starting at 1
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn status(&self) -> RestartStatus {
        self.status_rx.borrow().clone()
    }

    pub fn is_settled(&self) -> bool {
        !self.status_rx.borrow().is_pending()
    }

    /// Wait until the restart has either succeeded or failed.
    pub async fn settled(&self) -> RestartStatus {
        let mut status_rx = self.status_rx.clone();
        match status_rx.wait_for(|status| !status.is_pending()).await {
            Ok(status) => status.clone(),
            Err(_) => RestartStatus::Failed {
                reason: String::from("restart abandoned"),
            },
        }
    }
}

/// Bookkeeping for restart operations.
///
/// At most one restart is running and at most one more is queued behind it.
/// Shared read-only with the client-build gate.
#[derive(Debug, Clone, Default)]
pub struct RestartTracker {
    slots: Arc<Mutex<Slots>>,
}

#[derive(Debug, Default)]
struct Slots {
    running: Option<RestartTicket>,
    queued: Option<RestartTicket>,
    requested: u64,
    started: u64,
    last: Option<RestartStatus>,
}

/// Result of asking for a restart
pub(crate) enum Request {
    /// A new restart was queued; the caller must run it and resolve `status_tx`
    Created {
        ticket: RestartTicket,
        status_tx: watch::Sender<RestartStatus>,
    },
    /// An already-queued restart will cover this request
    Joined(RestartTicket),
}

impl RestartTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently requested restart, queued or running.
    ///
    /// `None` until the first restart is requested.
    pub fn current(&self) -> Option<RestartTicket> {
        let slots = self.lock();
        slots.queued.clone().or_else(|| slots.running.clone())
    }

    /// Number of restarts that have begun running
    pub fn restarts_started(&self) -> u64 {
        self.lock().started
    }

    /// Outcome of the most recently finished restart
    pub fn last_status(&self) -> Option<RestartStatus> {
        self.lock().last.clone()
    }

    pub(crate) fn request(&self) -> Request {
        let mut slots = self.lock();

        if let Some(queued) = &slots.queued {
            return Request::Joined(queued.clone());
        }

        slots.requested += 1;
        let (status_tx, status_rx) = watch::channel(RestartStatus::Pending);
        let ticket = RestartTicket {
            id: slots.requested,
            status_rx,
        };
        slots.queued = Some(ticket.clone());

        Request::Created { ticket, status_tx }
    }

    /// Move the queued restart `id` into the running slot
    pub(crate) fn begin(&self, id: u64) {
        let mut slots = self.lock();

        if slots.queued.as_ref().is_some_and(|ticket| ticket.id == id) {
            slots.running = slots.queued.take();
        }
        slots.started += 1;
    }

    pub(crate) fn finish(&self, status: RestartStatus) {
        self.lock().last = Some(status);
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Serialized restart cycles: stop the old worker, start a new one, publish.

use crate::restart_tracker::Request;
use crate::{
    ChangeNotificationGate, ClientBuildGate, RestartStatus, RestartTicket, RestartTracker,
    Result as SupervisorResult, SupervisorError, WorkerControl,
};

use devloop_reload::{Publish, ReloadEvent};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{error, info, warn};
use serde::Serialize;
use tokio::sync::{Mutex, watch};

/// Point-in-time view of the coordinator, for health reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartSnapshot {
    pub restarts_started: u64,
    pub last_status: Option<RestartStatus>,
    pub worker_running: bool,
}

/// Runs restart cycles one at a time.
///
/// Restart work happens on spawned tasks, so callers dropping their futures
/// never leave the worker slot half-updated or an outcome unresolved.
pub struct RestartCoordinator<W: WorkerControl> {
    inner: Arc<Inner<W>>,
}

struct Inner<W: WorkerControl> {
    workers: W,
    artifact: PathBuf,
    gate: ChangeNotificationGate,
    publisher: Arc<dyn Publish>,
    /// FIFO lock; holding it is the single in-flight slot
    worker: Mutex<Option<W::Handle>>,
    tracker: RestartTracker,
    shut_down: AtomicBool,
}

impl<W: WorkerControl> Clone for RestartCoordinator<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: WorkerControl> RestartCoordinator<W> {
    pub fn new(
        workers: W,
        artifact: PathBuf,
        gate: ChangeNotificationGate,
        publisher: Arc<dyn Publish>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                workers,
                artifact,
                gate,
                publisher,
                worker: Mutex::new(None),
                tracker: RestartTracker::new(),
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    pub fn artifact(&self) -> &Path {
        &self.inner.artifact
    }

    pub fn gate(&self) -> &ChangeNotificationGate {
        &self.inner.gate
    }

    /// Client-build gate observing this coordinator's restarts
    pub fn client_gate(&self, settle_delay: Duration) -> ClientBuildGate {
        ClientBuildGate::new(self.inner.tracker.clone(), settle_delay)
    }

    /// Request a restart and return its ticket without waiting.
    ///
    /// If a restart is already queued behind the running one, the request
    /// joins it instead of queueing another.
    pub fn request_restart(&self) -> RestartTicket {
        match self.inner.tracker.request() {
            Request::Joined(ticket) => {
                info!("Restart #{} already queued, joining it", ticket.id());
                ticket
            }
            Request::Created { ticket, status_tx } => {
                let inner = Arc::clone(&self.inner);
                let id = ticket.id();
                tokio::spawn(async move {
                    inner.run(id, status_tx).await;
                });
                ticket
            }
        }
    }

    /// Restart the worker after a successful server build and wait for the outcome.
    pub async fn on_server_build_succeeded(&self) -> RestartStatus {
        self.request_restart().settled().await
    }

    /// The most recently requested restart, or `None` if there never was one
    pub fn current_restart(&self) -> Option<RestartTicket> {
        self.inner.tracker.current()
    }

    /// Stop the current worker. Restarts requested afterwards fail.
    pub async fn shutdown(&self) {
        self.inner.shut_down.store(true, Ordering::SeqCst);

        let mut slot = self.inner.worker.lock().await;
        if let Some(handle) = slot.take() {
            info!("Stopping worker for shutdown");
            if let Err(e) = self.inner.workers.stop_worker(&handle).await {
                warn!("Failed to stop worker during shutdown: {e}");
            }
        }
    }

    pub fn snapshot(&self) -> RestartSnapshot {
        // A held slot means a restart is mid-cycle and no worker is serving
        let worker_running = match self.inner.worker.try_lock() {
            Ok(slot) => slot
                .as_ref()
                .is_some_and(|handle| self.inner.workers.is_alive(handle)),
            Err(_) => false,
        };

        RestartSnapshot {
            restarts_started: self.inner.tracker.restarts_started(),
            last_status: self.inner.tracker.last_status(),
            worker_running,
        }
    }
}

impl<W: WorkerControl> Inner<W> {
    async fn run(&self, id: u64, status_tx: watch::Sender<RestartStatus>) {
        let mut slot = self.worker.lock().await;
        self.tracker.begin(id);

        let status = if self.shut_down.load(Ordering::SeqCst) {
            warn!("Restart #{id} skipped, coordinator is shut down");
            RestartStatus::Failed {
                reason: String::from("coordinator shut down"),
            }
        } else {
            info!("Restart #{id} started");
            match self.cycle(&mut slot).await {
                Ok(()) => {
                    info!("Restart #{id} succeeded");
                    RestartStatus::Succeeded
                }
                Err(e) => {
                    error!("Restart #{id} failed: {e}");
                    RestartStatus::Failed { reason: e.reason() }
                }
            }
        };

        self.tracker.finish(status.clone());
        status_tx.send_replace(status);
    }

    async fn cycle(&self, slot: &mut Option<W::Handle>) -> SupervisorResult<()> {
        if let Some(previous) = slot.take()
            && let Err(e) = self.workers.stop_worker(&previous).await
        {
            // The handle is dropped here, which still terminates the process
            warn!("Failed to stop previous worker cleanly: {e}");
        }

        let handle = self.workers.start_worker(&self.artifact).await?;

        if !self.workers.is_alive(&handle) {
            return Err(SupervisorError::abnormal_exit(None));
        }
        *slot = Some(handle);

        if self.gate.should_notify() {
            info!("Server components changed, publishing reload");
            self.publisher.publish(ReloadEvent::RscUpdate);
        }

        Ok(())
    }
}

use crate::{Result as SupervisorResult, SupervisorError, WorkerState};

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};

/// Identifier assigned to each spawned worker, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a running worker process.
///
/// The process is owned by a monitor task; the handle observes its state and
/// requests termination. Dropping the handle terminates the worker.
pub struct WorkerHandle {
    id: WorkerId,
    pid: Option<u32>,
    state_rx: watch::Receiver<WorkerState>,
    stop_tx: mpsc::Sender<()>,
    stop_requested: AtomicBool,
}

impl WorkerHandle {
    pub(crate) fn new(
        id: WorkerId,
        pid: Option<u32>,
        state_rx: watch::Receiver<WorkerState>,
        stop_tx: mpsc::Sender<()>,
    ) -> Self {
        Self {
            id,
            pid,
            state_rx,
            stop_tx,
            stop_requested: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// OS process id, if the process was still alive right after spawn
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Current lifecycle state
    pub fn state(&self) -> WorkerState {
        *self.state_rx.borrow()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state_rx.clone()
    }

    /// Resolve once the process has exited.
    ///
    /// An exit the supervisor asked for, or a zero exit code, is `Ok`.
    /// Anything else is `WorkerAbnormalExit`.
    pub async fn exited(&self) -> SupervisorResult<()> {
        let mut state_rx = self.state_rx.clone();
        let state = state_rx
            .wait_for(WorkerState::is_dead)
            .await
            .map(|state| *state);

        match state {
            Ok(WorkerState::Dead { code: Some(0) }) => Ok(()),
            Ok(WorkerState::Dead { .. }) if self.stop_requested() => Ok(()),
            Ok(WorkerState::Dead { code }) => Err(SupervisorError::abnormal_exit(code)),
            Ok(_) | Err(_) => Err(SupervisorError::abnormal_exit(None)),
        }
    }

    pub(crate) fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        // Full means a stop is already queued; closed means the monitor is gone
        let _ = self.stop_tx.try_send(());
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("id", &self.id)
            .field("pid", &self.pid)
            .field("state", &self.state())
            .finish()
    }
}

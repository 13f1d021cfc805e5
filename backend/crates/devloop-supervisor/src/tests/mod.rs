mod client_gate;
mod protocol;

use crate::{
    ChangeNotificationGate, RestartCoordinator, Result as SupervisorResult, SupervisorError,
    WorkerControl,
};

use devloop_reload::{Publish, ReloadEvent};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

pub(crate) const STARTUP: Duration = Duration::from_millis(500);
pub(crate) const STOP: Duration = Duration::from_millis(50);
pub(crate) const READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Scripted result of one `start_worker` call
#[derive(Debug, Clone, Copy)]
pub(crate) enum StartOutcome {
    Ready,
    Timeout,
    Exit(i32),
}

#[derive(Default)]
pub(crate) struct FakeStats {
    pub live: AtomicUsize,
    pub max_live: AtomicUsize,
    pub started: AtomicUsize,
    pub stopped: AtomicUsize,
    script: Mutex<VecDeque<StartOutcome>>,
}

/// In-process stand-in for the worker supervisor.
///
/// Counts a worker as live from the moment it starts spawning until it is
/// stopped, which is stricter than "Ready".
#[derive(Clone, Default)]
pub(crate) struct FakeWorkers {
    pub stats: Arc<FakeStats>,
}

pub(crate) struct FakeHandle {
    alive: AtomicBool,
}

impl FakeWorkers {
    pub fn script(&self, outcomes: impl IntoIterator<Item = StartOutcome>) {
        self.stats.script.lock().unwrap().extend(outcomes);
    }

    pub fn started(&self) -> usize {
        self.stats.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stats.stopped.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.stats.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.stats.max_live.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkerControl for FakeWorkers {
    type Handle = FakeHandle;

    async fn start_worker(&self, _artifact: &Path) -> SupervisorResult<FakeHandle> {
        let outcome = self
            .stats
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StartOutcome::Ready);

        self.stats.started.fetch_add(1, Ordering::SeqCst);
        let live = self.stats.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_live.fetch_max(live, Ordering::SeqCst);

        match outcome {
            StartOutcome::Ready => {
                tokio::time::sleep(STARTUP).await;
                Ok(FakeHandle {
                    alive: AtomicBool::new(true),
                })
            }
            StartOutcome::Timeout => {
                tokio::time::sleep(READY_TIMEOUT).await;
                self.stats.live.fetch_sub(1, Ordering::SeqCst);
                Err(SupervisorError::start_timeout(READY_TIMEOUT.as_millis() as u64))
            }
            StartOutcome::Exit(code) => {
                tokio::time::sleep(STARTUP / 2).await;
                self.stats.live.fetch_sub(1, Ordering::SeqCst);
                Err(SupervisorError::abnormal_exit(Some(code)))
            }
        }
    }

    async fn stop_worker(&self, handle: &FakeHandle) -> SupervisorResult<()> {
        if handle.alive.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(STOP).await;
            self.stats.live.fetch_sub(1, Ordering::SeqCst);
            self.stats.stopped.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_alive(&self, handle: &FakeHandle) -> bool {
        handle.alive.load(Ordering::SeqCst)
    }
}

/// Publisher that records every event
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    events: Mutex<Vec<ReloadEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ReloadEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Publish for RecordingPublisher {
    fn publish(&self, event: ReloadEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub(crate) struct Harness {
    pub workers: FakeWorkers,
    pub publisher: Arc<RecordingPublisher>,
    pub coordinator: RestartCoordinator<FakeWorkers>,
}

pub(crate) fn harness() -> Harness {
    let workers = FakeWorkers::default();
    let publisher = Arc::new(RecordingPublisher::default());
    let coordinator = RestartCoordinator::new(
        workers.clone(),
        PathBuf::from("dist/main.mjs"),
        ChangeNotificationGate::new(),
        publisher.clone(),
    );

    Harness {
        workers,
        publisher,
        coordinator,
    }
}


use devloop_supervisor::{Result as SupervisorResult, SupervisorError, WorkerControl};

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

pub(crate) const STARTUP: Duration = Duration::from_millis(400);

/// Worker control that becomes ready after a fixed delay
#[derive(Clone, Default)]
pub(crate) struct FakeWorkers {
    started: Arc<AtomicUsize>,
    fail_next: Arc<AtomicBool>,
}

pub(crate) struct FakeHandle {
    alive: AtomicBool,
}

impl FakeWorkers {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn fail_next_start(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkerControl for FakeWorkers {
    type Handle = FakeHandle;

    async fn start_worker(&self, _artifact: &Path) -> SupervisorResult<FakeHandle> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(STARTUP).await;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SupervisorError::abnormal_exit(Some(1)));
        }
        Ok(FakeHandle {
            alive: AtomicBool::new(true),
        })
    }

    async fn stop_worker(&self, handle: &FakeHandle) -> SupervisorResult<()> {
        handle.alive.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_alive(&self, handle: &FakeHandle) -> bool {
        handle.alive.load(Ordering::SeqCst)
    }
}

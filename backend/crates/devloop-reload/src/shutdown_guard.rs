use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Helper for gracefully handling shutdown in async tasks
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for shutdown signal. Returns immediately once triggered or when
    /// the coordinator is gone.
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.wait_for(|down| *down).await;
    }

    /// Poll for shutdown signal (non-blocking)
    pub fn poll_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }
}

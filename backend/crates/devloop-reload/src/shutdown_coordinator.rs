use crate::ShutdownGuard;

use std::sync::Arc;

use tokio::sync::watch;

/// Graceful shutdown coordinator
///
/// Backed by a watch channel so subscribers created after the trigger still
/// observe it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    /// Create a new shutdown coordinator
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        log::info!("Shutdown signal received, notifying all subsystems");
        self.shutdown_tx.send_replace(true);
    }

    /// Check if shutdown has been triggered (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Convenience method to create a guard (used in handlers)
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

use crate::Result as SupervisorResult;

use std::path::Path;

use async_trait::async_trait;

/// Start and stop workers.
///
/// The restart coordinator only talks to workers through this trait.
#[async_trait]
pub trait WorkerControl: Send + Sync + 'static {
    type Handle: Send + Sync + 'static;

    /// Spawn a worker for `artifact` and resolve once it reports ready
    async fn start_worker(&self, artifact: &Path) -> SupervisorResult<Self::Handle>;

    /// Terminate the worker and wait for it to exit; no-op when already dead
    async fn stop_worker(&self, handle: &Self::Handle) -> SupervisorResult<()>;

    /// Whether the worker behind `handle` is still alive
    fn is_alive(&self, handle: &Self::Handle) -> bool;
}

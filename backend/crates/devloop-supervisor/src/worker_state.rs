/// Lifecycle state of a worker process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Spawned, waiting for the ready message
    Starting,
    /// Ready message received, serving traffic
    Ready,
    /// Stop requested, waiting for the process to exit
    Terminating,
    /// Process exited; `code` is `None` when killed by a signal
    Dead { code: Option<i32> },
}

impl WorkerState {
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead { .. })
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pending-notification flag for server component changes.
///
/// Set when a server build touched server-rendered output; consumed by the
/// restart that follows once its worker is ready.
#[derive(Debug, Clone, Default)]
pub struct ChangeNotificationGate {
    pending: Arc<AtomicBool>,
}

impl ChangeNotificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_server_component_changed(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once per mark, then clears the flag
    pub fn should_notify(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    /// Peek at the flag without consuming it
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}

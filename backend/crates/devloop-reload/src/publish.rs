use crate::ReloadEvent;

/// Fire-and-forget sink for reload events.
///
/// Implementations must not block; delivery is best effort and there is no
/// acknowledgment.
pub trait Publish: Send + Sync {
    fn publish(&self, event: ReloadEvent);
}

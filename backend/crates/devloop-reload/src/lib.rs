//! Live-reload transport: typed reload events, a broadcast hub and the
//! Server-Sent-Events endpoint browsers subscribe to.

pub mod broadcast_config;
pub mod error;
pub mod event_stream;
pub mod publish;
pub mod reload_broadcaster;
pub mod reload_event;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream_config;

pub use broadcast_config::BroadcastConfig;
pub use error::{ReloadError, Result};
pub use event_stream::{ReloadState, event_stream, router};
pub use publish::Publish;
pub use reload_broadcaster::{ReloadBroadcaster, ReloadSubscription};
pub use reload_event::ReloadEvent;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use stream_config::StreamConfig;

#[cfg(test)]
mod tests;

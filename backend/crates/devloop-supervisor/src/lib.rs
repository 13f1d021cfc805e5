//! Worker process supervision and restart coordination for the dev loop.
//!
//! A successful server build triggers a restart cycle: stop the old worker,
//! start a new one from the fresh artifact, then publish a reload event if a
//! server component changed. Client builds wait on whatever restart they can
//! observe before they settle.

pub mod change_gate;
pub mod client_gate;
pub mod error;
pub mod protocol;
pub mod restart_coordinator;
pub mod restart_status;
pub mod restart_tracker;
pub mod worker_control;
pub mod worker_handle;
pub mod worker_settings;
pub mod worker_state;
pub mod worker_supervisor;

pub use change_gate::ChangeNotificationGate;
pub use client_gate::{ClientBuildGate, ClientSettle};
pub use error::{Result, SupervisorError};
pub use protocol::{WorkerMessage, parse_line};
pub use restart_coordinator::{RestartCoordinator, RestartSnapshot};
pub use restart_status::RestartStatus;
pub use restart_tracker::{RestartTicket, RestartTracker};
pub use worker_control::WorkerControl;
pub use worker_handle::{WorkerHandle, WorkerId};
pub use worker_settings::WorkerSettings;
pub use worker_state::WorkerState;
pub use worker_supervisor::WorkerSupervisor;

/// Environment variable carrying the worker's id into the worker process
pub const WORKER_ID_ENV: &str = "DEVLOOP_WORKER_ID";

/// Environment variable carrying the port the worker should listen on
pub const WORKER_PORT_ENV: &str = "PORT";

#[cfg(test)]
mod tests;

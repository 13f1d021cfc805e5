use devloop_reload::ReloadBroadcaster;
use devloop_supervisor::{RestartCoordinator, RestartSnapshot, WorkerControl};

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Source of restart state for the health endpoint
pub trait RestartReport: Send + Sync {
    fn snapshot(&self) -> RestartSnapshot;
}

impl<W: WorkerControl> RestartReport for RestartCoordinator<W> {
    fn snapshot(&self) -> RestartSnapshot {
        RestartCoordinator::snapshot(self)
    }
}

#[derive(Clone)]
pub struct HealthState {
    pub restarts: Arc<dyn RestartReport>,
    pub broadcaster: ReloadBroadcaster,
}

/// GET /health - dev loop status
///
/// Reports `degraded` while the most recent restart has failed; the next
/// successful server build clears it.
pub async fn health(State(state): State<HealthState>) -> Response {
    let snapshot = state.restarts.snapshot();
    let degraded = snapshot
        .last_status
        .as_ref()
        .is_some_and(|status| status.is_failed());

    let health = json!({
        "status": if degraded { "degraded" } else { "ok" },
        "version": env!("CARGO_PKG_VERSION"),
        "worker": {
            "running": snapshot.worker_running,
            "restarts": snapshot.restarts_started,
            "last_restart": snapshot.last_status,
        },
        "reload": {
            "subscribers": state.broadcaster.subscriber_count(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

use crate::health::{self, HealthState};

use devloop_reload::ReloadState;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Build the dev server router: health probes plus the reload event stream
pub fn build_router(health: HealthState, reload: ReloadState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .with_state(health)
        .merge(devloop_reload::router(reload))
        // Browsers load the app from the worker's origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

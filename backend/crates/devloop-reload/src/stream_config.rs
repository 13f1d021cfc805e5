use std::time::Duration;

/// Settings for the event-stream endpoint
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub path: String,
    pub heartbeat: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            path: String::from("/__rspack_hmr"),
            heartbeat: Duration::from_secs(10),
        }
    }
}

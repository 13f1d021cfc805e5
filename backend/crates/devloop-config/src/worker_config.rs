use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_READY_TIMEOUT_MS, DEFAULT_SHUTDOWN_TIMEOUT_MS,
    DEFAULT_WORKER_ARTIFACT, DEFAULT_WORKER_PORT, DEFAULT_WORKER_RUNTIME, MAX_READY_TIMEOUT_MS,
    MIN_PORT, MIN_READY_TIMEOUT_MS,
};

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

/// How the server bundle is hosted.
///
/// The worker is launched as `<runtime> <args...> <artifact>` and must print
/// `{"type":"ready"}` on stdout once it accepts traffic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub runtime: String,
    pub args: Vec<String>,
    /// Server bundle path, relative to the project root
    pub artifact: String,
    /// Exported to the worker as `PORT`
    pub port: u16,
    pub ready_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub env: BTreeMap<String, String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            runtime: String::from(DEFAULT_WORKER_RUNTIME),
            args: Vec::new(),
            artifact: String::from(DEFAULT_WORKER_ARTIFACT),
            port: DEFAULT_WORKER_PORT,
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
            env: BTreeMap::new(),
        }
    }
}

impl WorkerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.runtime.trim().is_empty() {
            return Err(ConfigError::worker("worker.runtime cannot be empty"));
        }

        if self.artifact.trim().is_empty() {
            return Err(ConfigError::worker("worker.artifact cannot be empty"));
        }

        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::worker(format!(
                "worker.port must be 0 or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if !(MIN_READY_TIMEOUT_MS..=MAX_READY_TIMEOUT_MS).contains(&self.ready_timeout_ms) {
            return Err(ConfigError::worker(format!(
                "worker.ready_timeout_ms must be {}-{}, got {}",
                MIN_READY_TIMEOUT_MS, MAX_READY_TIMEOUT_MS, self.ready_timeout_ms
            )));
        }

        if self.shutdown_timeout_ms == 0 {
            return Err(ConfigError::worker(
                "worker.shutdown_timeout_ms must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

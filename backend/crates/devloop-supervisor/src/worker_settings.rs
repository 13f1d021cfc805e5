use crate::WORKER_PORT_ENV;

use devloop_config::WorkerConfig;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything needed to spawn a worker, resolved against the project root.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub runtime: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
    pub ready_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl WorkerSettings {
    pub fn from_config(config: &WorkerConfig, project_root: &Path) -> Self {
        let mut env = config.env.clone();
        env.insert(WORKER_PORT_ENV.to_string(), config.port.to_string());

        Self {
            runtime: config.runtime.clone(),
            args: config.args.clone(),
            cwd: project_root.to_path_buf(),
            env,
            ready_timeout: config.ready_timeout(),
            shutdown_timeout: config.shutdown_timeout(),
        }
    }
}

use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CHANNEL_CAPACITY, DEFAULT_HEARTBEAT_SECS,
    DEFAULT_HMR_PATH, DEFAULT_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Path of the event stream browsers connect to
    pub path: String,
    pub heartbeat_secs: u64,
    pub channel_capacity: usize,
    /// Pause after a server restart before a client build counts as settled
    pub settle_delay_ms: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_HMR_PATH),
            heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ReloadConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::reload(format!(
                "reload.path must start with '/', got '{}'",
                self.path
            )));
        }

        if self.heartbeat_secs == 0 {
            return Err(ConfigError::reload(
                "reload.heartbeat_secs must be greater than 0",
            ));
        }

        if self.channel_capacity == 0 {
            return Err(ConfigError::reload(
                "reload.channel_capacity must be greater than 0",
            ));
        }

        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::reload(format!(
                "reload.settle_delay_ms must be <= {}, got {}",
                MAX_SETTLE_DELAY_MS, self.settle_delay_ms
            )));
        }

        Ok(())
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

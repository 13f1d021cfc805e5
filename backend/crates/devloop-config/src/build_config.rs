use crate::{ConfigError, ConfigErrorResult, DEFAULT_DEBOUNCE_MS, DEFAULT_WATCH_ROOT};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub debounce_ms: u64,
    pub client: TargetConfig,
    pub server: TargetConfig,
}

/// One watched build pipeline
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetConfig {
    pub enabled: bool,
    /// argv of the build command, run from the project root
    pub command: Vec<String>,
    /// Directories watched recursively, relative to the project root
    pub watch: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            client: TargetConfig::rspack("client"),
            server: TargetConfig::rspack("server"),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: Vec::new(),
            watch: vec![String::from(DEFAULT_WATCH_ROOT)],
        }
    }
}

impl TargetConfig {
    fn rspack(config_name: &str) -> Self {
        Self {
            command: ["npx", "rspack", "build", "--config-name", config_name]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Self::default()
        }
    }

    fn validate(&self, name: &str) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.command.is_empty() || self.command[0].trim().is_empty() {
            return Err(ConfigError::build(format!(
                "build.{name}.command cannot be empty"
            )));
        }

        if self.watch.is_empty() {
            return Err(ConfigError::build(format!(
                "build.{name}.watch needs at least one directory"
            )));
        }

        Ok(())
    }
}

impl BuildConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.client.validate("client")?;
        self.server.validate("server")?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

use crate::{
    BuildConfig, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError,
    ConfigErrorResult, LoggingConfig, ReloadConfig, ServerConfig, WorkerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub worker: WorkerConfig,
    pub reload: ReloadConfig,
    pub build: BuildConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from `config_dir`.
    ///
    /// Loading order:
    /// 1. config.toml in that directory if it exists, else defaults
    /// 2. DEVLOOP_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after loading.
    pub fn load_from_dir(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DEVLOOP_CONFIG_DIR env var > ./.devloop/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after loading to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.worker.validate()?;
        self.reload.validate()?;
        self.build.validate()?;

        if self.server.port != 0 && self.server.port == self.worker.port {
            return Err(ConfigError::config(format!(
                "server.port and worker.port must differ, both are {}",
                self.server.port
            )));
        }

        Ok(())
    }

    /// Absolute path of the server bundle the worker runs.
    pub fn artifact_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.worker.artifact)
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  worker: {} {} {} (port {}, ready timeout {}ms, shutdown timeout {}ms)",
            self.worker.runtime,
            self.worker.args.join(" "),
            self.worker.artifact,
            self.worker.port,
            self.worker.ready_timeout_ms,
            self.worker.shutdown_timeout_ms
        );
        info!(
            "  reload: {} (heartbeat {}s, capacity {}, settle {}ms)",
            self.reload.path,
            self.reload.heartbeat_secs,
            self.reload.channel_capacity,
            self.reload.settle_delay_ms
        );
        for (name, target) in [("client", &self.build.client), ("server", &self.build.server)] {
            if target.enabled {
                info!(
                    "  build.{}: `{}` watching [{}]",
                    name,
                    target.command.join(" "),
                    target.watch.join(", ")
                );
            } else {
                info!("  build.{}: disabled", name);
            }
        }
        info!("  build debounce: {}ms", self.build.debounce_ms);
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("DEVLOOP_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("DEVLOOP_SERVER_PORT", &mut self.server.port);

        // Worker
        Self::apply_env_string("DEVLOOP_WORKER_RUNTIME", &mut self.worker.runtime);
        Self::apply_env_string("DEVLOOP_WORKER_ARTIFACT", &mut self.worker.artifact);
        Self::apply_env_parse("DEVLOOP_WORKER_PORT", &mut self.worker.port);
        Self::apply_env_parse(
            "DEVLOOP_WORKER_READY_TIMEOUT_MS",
            &mut self.worker.ready_timeout_ms,
        );
        Self::apply_env_parse(
            "DEVLOOP_WORKER_SHUTDOWN_TIMEOUT_MS",
            &mut self.worker.shutdown_timeout_ms,
        );

        // Reload
        Self::apply_env_string("DEVLOOP_RELOAD_PATH", &mut self.reload.path);
        Self::apply_env_parse(
            "DEVLOOP_RELOAD_HEARTBEAT_SECS",
            &mut self.reload.heartbeat_secs,
        );
        Self::apply_env_parse(
            "DEVLOOP_RELOAD_CHANNEL_CAPACITY",
            &mut self.reload.channel_capacity,
        );
        Self::apply_env_parse(
            "DEVLOOP_RELOAD_SETTLE_DELAY_MS",
            &mut self.reload.settle_delay_ms,
        );

        // Build
        Self::apply_env_parse("DEVLOOP_BUILD_DEBOUNCE_MS", &mut self.build.debounce_ms);
        Self::apply_env_bool("DEVLOOP_BUILD_CLIENT_ENABLED", &mut self.build.client.enabled);
        Self::apply_env_bool("DEVLOOP_BUILD_SERVER_ENABLED", &mut self.build.server.enabled);

        // Logging
        Self::apply_env_parse("DEVLOOP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DEVLOOP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DEVLOOP_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

mod build_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod reload_config;
mod server_config;
mod worker_config;

#[cfg(test)]
mod tests;

pub use build_config::{BuildConfig, TargetConfig};
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use reload_config::ReloadConfig;
pub use server_config::ServerConfig;
pub use worker_config::WorkerConfig;

const CONFIG_DIR_ENV: &str = "DEVLOOP_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".devloop";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 1616;
const MIN_PORT: u16 = 1024;

const DEFAULT_WORKER_RUNTIME: &str = "node";
const DEFAULT_WORKER_ARTIFACT: &str = "dist/main.mjs";
const DEFAULT_WORKER_PORT: u16 = 1617;
const DEFAULT_READY_TIMEOUT_MS: u64 = 10_000;
const MIN_READY_TIMEOUT_MS: u64 = 100;
const MAX_READY_TIMEOUT_MS: u64 = 600_000;
const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;

const DEFAULT_HMR_PATH: &str = "/__rspack_hmr";
const DEFAULT_HEARTBEAT_SECS: u64 = 10;
const DEFAULT_CHANNEL_CAPACITY: usize = 128;
const DEFAULT_SETTLE_DELAY_MS: u64 = 1_000;
const MAX_SETTLE_DELAY_MS: u64 = 60_000;

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_WATCH_ROOT: &str = "src";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

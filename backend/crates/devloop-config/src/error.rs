use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::generic("Config", message)
    }

    /// Create a server error
    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::generic("Server", message)
    }

    /// Create a worker error
    #[track_caller]
    pub fn worker<S: Into<String>>(message: S) -> Self {
        Self::generic("Worker", message)
    }

    /// Create a reload error
    #[track_caller]
    pub fn reload<S: Into<String>>(message: S) -> Self {
        Self::generic("Reload", message)
    }

    /// Create a build error
    #[track_caller]
    pub fn build<S: Into<String>>(message: S) -> Self {
        Self::generic("Build", message)
    }

    #[track_caller]
    fn generic<S: Into<String>>(category: &'static str, message: S) -> Self {
        ConfigError::Generic {
            category,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Category of a generic error, `None` for IO/parse failures
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Self::Generic { category, .. } => Some(category),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;

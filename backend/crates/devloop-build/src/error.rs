use crate::BuildTarget;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("No build command configured for the {target} target {location}")]
    EmptyCommand {
        target: BuildTarget,
        location: ErrorLocation,
    },

    #[error("Failed to watch {path}: {source} {location}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
        location: ErrorLocation,
    },

    #[error("Failed to run build command `{program}`: {source} {location}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl BuildError {
    #[track_caller]
    pub fn empty_command(target: BuildTarget) -> Self {
        Self::EmptyCommand {
            target,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn watch(path: impl Into<PathBuf>, source: notify::Error) -> Self {
        Self::Watch {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn command_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            program: program.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

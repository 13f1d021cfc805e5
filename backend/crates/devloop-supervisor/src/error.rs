use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Failed to spawn worker `{program}`: {source} {location}")]
    WorkerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Worker did not report ready within {timeout_ms}ms {location}")]
    WorkerStartTimeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Worker exited abnormally with code {code:?} {location}")]
    WorkerAbnormalExit {
        code: Option<i32>,
        location: ErrorLocation,
    },

    #[error("Failed to signal worker {pid}: {message} {location}")]
    WorkerSignal {
        pid: u32,
        message: String,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    #[track_caller]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::WorkerSpawn {
            program: program.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn start_timeout(timeout_ms: u64) -> Self {
        Self::WorkerStartTimeout {
            timeout_ms,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn abnormal_exit(code: Option<i32>) -> Self {
        Self::WorkerAbnormalExit {
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn signal(pid: u32, message: impl Into<String>) -> Self {
        Self::WorkerSignal {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short description without the capture location, for status reporting
    pub fn reason(&self) -> String {
        match self {
            Self::WorkerSpawn {
                program, source, ..
            } => format!("failed to spawn `{program}`: {source}"),
            Self::WorkerStartTimeout { timeout_ms, .. } => {
                format!("worker not ready within {timeout_ms}ms")
            }
            Self::WorkerAbnormalExit { code: Some(code), .. } => {
                format!("worker exited with code {code}")
            }
            Self::WorkerAbnormalExit { code: None, .. } => {
                String::from("worker terminated by signal")
            }
            Self::WorkerSignal { pid, message, .. } => {
                format!("failed to signal worker {pid}: {message}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReloadError {
    #[error("Failed to encode reload event: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for ReloadError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReloadError>;

use crate::Result as ReloadResult;

use serde::{Deserialize, Serialize};

/// Message pushed to connected browsers, serialized as `{"type": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReloadEvent {
    /// Server-rendered output changed and the new worker is ready
    #[serde(rename = "rsc:update")]
    RscUpdate,

    /// Client bundle rebuilt and safe to fetch
    #[serde(rename = "client:built")]
    ClientBuilt { build_id: u64 },
}

impl ReloadEvent {
    /// Wire name of the event, used for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RscUpdate => "rsc:update",
            Self::ClientBuilt { .. } => "client:built",
        }
    }

    pub fn to_json(&self) -> ReloadResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

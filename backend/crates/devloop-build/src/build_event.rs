use crate::BuildTarget;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Completion of one build of one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEvent {
    pub target: BuildTarget,
    pub success: bool,
    /// Per-pipeline sequence number, starting at 1 for the initial build
    pub build_id: u64,
    pub timestamp: DateTime<Utc>,
    /// Source paths whose change triggered this build; empty for the initial build
    pub changed: Vec<PathBuf>,
    /// Whether the change touched server-rendered output
    pub touched_server_components: bool,
}

impl BuildEvent {
    pub fn new(
        target: BuildTarget,
        build_id: u64,
        success: bool,
        changed: Vec<PathBuf>,
        touched_server_components: bool,
    ) -> Self {
        Self {
            target,
            success,
            build_id,
            timestamp: Utc::now(),
            changed,
            touched_server_components,
        }
    }
}

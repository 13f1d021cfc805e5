//! Messages a worker writes to stdout, one JSON object per line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerMessage {
    /// Initialization finished; the worker accepts traffic from now on
    Ready,
}

/// Parse a stdout line as a protocol message.
///
/// Returns `None` for anything else, which callers treat as plain log output.
pub fn parse_line(line: &str) -> Option<WorkerMessage> {
    let trimmed = line.trim();
    if !trimmed.starts_with('{') {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

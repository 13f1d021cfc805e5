use crate::{BuildError, Result as BuildResult};

use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Start watching `roots` recursively.
///
/// Events are buffered in the returned channel from this point on, so a build
/// that runs afterwards cannot miss changes. The watcher stops when dropped.
/// Roots that do not exist are skipped with a warning.
pub(crate) fn watch(
    roots: &[PathBuf],
) -> BuildResult<(RecommendedWatcher, mpsc::UnboundedReceiver<notify::Event>)> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
        match result {
            Ok(event) => {
                let _ = event_tx.send(event);
            }
            Err(e) => log::warn!("watch error: {}", e),
        }
    })
    .map_err(|e| BuildError::watch(roots.first().cloned().unwrap_or_default(), e))?;

    for root in roots {
        if !root.exists() {
            log::warn!("Watch root {} does not exist, skipping", root.display());
            continue;
        }
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| BuildError::watch(root, e))?;
        log::debug!("Watching {}", root.display());
    }

    Ok((watcher, event_rx))
}

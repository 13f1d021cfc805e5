use crate::ChangeKind;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::EventKind;
use notify::event::ModifyKind;
use tokio::time::Instant;

/// Idle wait when nothing is pending
const IDLE: Duration = Duration::from_secs(86_400);

/// Collects raw watcher events until the tree has been quiet for the
/// debounce window.
#[derive(Debug)]
pub struct Debouncer {
    debounce: Duration,
    changes: HashMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
}

impl Debouncer {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            changes: HashMap::new(),
            last_event: None,
        }
    }

    /// Record a notify event.
    ///
    /// Per path: removed then created/modified becomes the newer event,
    /// modified then removed becomes removed, created then removed cancels
    /// out, and otherwise the first event wins. Metadata-only changes and
    /// editor temp files are ignored.
    pub fn add_event(&mut self, event: &notify::Event) {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Remove(_) => ChangeKind::Removed,
            EventKind::Modify(ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => ChangeKind::Modified,
            _ => return,
        };

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }

            match self.changes.get(path).copied() {
                None => {
                    self.changes.insert(path.clone(), kind);
                }
                Some(ChangeKind::Removed)
                    if matches!(kind, ChangeKind::Created | ChangeKind::Modified) =>
                {
                    self.changes.insert(path.clone(), kind);
                }
                Some(ChangeKind::Modified) if kind == ChangeKind::Removed => {
                    self.changes.insert(path.clone(), ChangeKind::Removed);
                }
                Some(ChangeKind::Created) if kind == ChangeKind::Removed => {
                    self.changes.remove(path);
                }
                Some(_) => continue,
            }

            log::debug!("watch: {} {}", kind.label(), path.display());
            self.last_event = Some(Instant::now());
        }
    }

    /// Whether the debounce window has passed with changes pending
    pub fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        last_event.elapsed() >= self.debounce && !self.changes.is_empty()
    }

    /// Drain pending changes, sorted by path, once the window has passed
    pub fn take_if_ready(&mut self) -> Option<Vec<(PathBuf, ChangeKind)>> {
        if !self.is_ready() {
            return None;
        }

        self.last_event = None;
        let mut changes: Vec<_> = self.changes.drain().collect();
        changes.sort_by(|a, b| a.0.cmp(&b.0));
        Some(changes)
    }

    /// Time left until the pending changes become ready
    pub fn sleep_duration(&self) -> Duration {
        match self.last_event {
            Some(last_event) => self
                .debounce
                .saturating_sub(last_event.elapsed())
                .max(Duration::from_millis(1)),
            None => IDLE,
        }
    }
}

/// Editor swap, backup and hidden files
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

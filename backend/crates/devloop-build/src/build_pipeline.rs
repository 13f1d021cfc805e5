use crate::{
    BuildError, BuildEvent, BuildTarget, ChangeKind, Debouncer, Result as BuildResult, run_build,
    touches_server_components, watcher,
};

use devloop_config::TargetConfig;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// One continuously watching build pipeline.
#[derive(Debug, Clone)]
pub struct BuildPipeline {
    target: BuildTarget,
    command: Vec<String>,
    roots: Vec<PathBuf>,
    cwd: PathBuf,
    debounce: Duration,
}

impl BuildPipeline {
    pub fn new(
        target: BuildTarget,
        command: Vec<String>,
        roots: Vec<PathBuf>,
        cwd: PathBuf,
        debounce: Duration,
    ) -> BuildResult<Self> {
        if command.is_empty() {
            return Err(BuildError::empty_command(target));
        }

        Ok(Self {
            target,
            command,
            roots,
            cwd,
            debounce,
        })
    }

    /// Pipeline for a configured target, with watch roots resolved against `project_root`
    pub fn from_config(
        target: BuildTarget,
        config: &TargetConfig,
        project_root: &Path,
        debounce: Duration,
    ) -> BuildResult<Self> {
        let roots = config
            .watch
            .iter()
            .map(|root| project_root.join(root))
            .collect();

        Self::new(
            target,
            config.command.clone(),
            roots,
            project_root.to_path_buf(),
            debounce,
        )
    }

    /// Build once, then rebuild on every debounced change until shutdown or
    /// until nobody listens for events anymore.
    ///
    /// Only watcher setup fails the pipeline. A build command that cannot be
    /// spawned is reported as a failed build.
    pub async fn run(
        self,
        events_tx: mpsc::Sender<BuildEvent>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> BuildResult<()> {
        // Watch before the initial build so changes made during it are kept
        let (_watcher, mut raw_rx) = watcher::watch(&self.roots)?;
        let mut debouncer = Debouncer::new(self.debounce);
        let mut build_id = 1;

        let initial = self.build(build_id, Vec::new()).await;
        if events_tx.send(initial).await.is_err() {
            return Ok(());
        }

        loop {
            tokio::select! {
                biased;
                _ = async { let _ = shutdown_rx.wait_for(|down| *down).await; } => break,
                Some(event) = raw_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    let Some(changes) = debouncer.take_if_ready() else {
                        continue;
                    };

                    build_id += 1;
                    let event = self.build(build_id, changes).await;
                    if events_tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        }

        log::debug!("{} build pipeline stopped", self.target);
        Ok(())
    }

    async fn build(&self, build_id: u64, changes: Vec<(PathBuf, ChangeKind)>) -> BuildEvent {
        if !changes.is_empty() {
            log::info!(
                "{} sources changed: {}",
                self.target,
                changes
                    .iter()
                    .map(|(path, kind)| format!("{} ({})", path.display(), kind.label()))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let success = match run_build(self.target, &self.command, &self.cwd).await {
            Ok(success) => success,
            Err(e) => {
                log::error!("{} build #{build_id} could not run: {e}", self.target);
                false
            }
        };
        let touched = touches_server_components(&changes);
        let changed = changes.into_iter().map(|(path, _)| path).collect();

        BuildEvent::new(self.target, build_id, success, changed, touched)
    }
}

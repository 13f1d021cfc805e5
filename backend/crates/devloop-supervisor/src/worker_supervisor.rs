//! Worker process lifecycle: spawn, readiness handshake, exit detection and
//! graceful termination.

use crate::{
    Result as SupervisorResult, SupervisorError, WORKER_ID_ENV, WorkerControl, WorkerHandle,
    WorkerId, WorkerMessage, WorkerSettings, WorkerState, parse_line,
};

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::{mpsc, oneshot, watch};

/// Spawns worker processes and owns their lifecycle.
///
/// Each worker gets a monitor task that reads its stdout, tracks its state and
/// terminates it on request or when its handle is dropped.
pub struct WorkerSupervisor {
    settings: WorkerSettings,
    next_id: AtomicU64,
}

impl WorkerSupervisor {
    pub fn new(settings: WorkerSettings) -> Self {
        Self {
            settings,
            next_id: AtomicU64::new(0),
        }
    }

    /// Spawn a worker running `artifact` and wait for its ready message.
    pub async fn start(&self, artifact: &Path) -> SupervisorResult<WorkerHandle> {
        let id = WorkerId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);

        info!(
            "Starting worker {id}: {} {} {}",
            self.settings.runtime,
            self.settings.args.join(" "),
            artifact.display()
        );

        let mut command = Command::new(&self.settings.runtime);
        command
            .args(&self.settings.args)
            .arg(artifact)
            .current_dir(&self.settings.cwd)
            .envs(&self.settings.env)
            .env(WORKER_ID_ENV, id.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| SupervisorError::spawn(&self.settings.runtime, e))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            SupervisorError::spawn(
                &self.settings.runtime,
                std::io::Error::other("worker stdout was not captured"),
            )
        })?;

        let pid = child.id();
        debug!("Worker {id} spawned with PID {pid:?}");

        let (state_tx, state_rx) = watch::channel(WorkerState::Starting);
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let (ready_tx, ready_rx) = oneshot::channel();

        tokio::spawn(monitor(
            id,
            child,
            stdout,
            state_tx,
            ready_tx,
            stop_rx,
            self.settings.shutdown_timeout,
        ));

        let handle = WorkerHandle::new(id, pid, state_rx, stop_tx);

        // The ready signal is latched, so a worker that exits right after
        // its handshake still counts as started
        match tokio::time::timeout(self.settings.ready_timeout, ready_rx).await {
            Ok(Ok(())) => {
                info!("Worker {id} ready");
                Ok(handle)
            }
            // Monitor finished without a ready message; the state is final
            Ok(Err(_)) => {
                let code = match handle.state() {
                    WorkerState::Dead { code } => code,
                    _ => None,
                };
                error!("Worker {id} exited before reporting ready (code {code:?})");
                Err(SupervisorError::abnormal_exit(code))
            }
            Err(_) => {
                let timeout_ms =
                    u64::try_from(self.settings.ready_timeout.as_millis()).unwrap_or(u64::MAX);
                error!("Worker {id} did not report ready within {timeout_ms}ms, stopping it");
                self.stop(&handle).await;
                Err(SupervisorError::start_timeout(timeout_ms))
            }
        }
    }

    /// Terminate a worker and wait until it has exited.
    pub async fn stop(&self, handle: &WorkerHandle) {
        if handle.state().is_dead() {
            debug!("Worker {} already dead, nothing to stop", handle.id());
            return;
        }

        info!("Stopping worker {}", handle.id());
        handle.request_stop();

        let mut state_rx = handle.subscribe();
        let _ = state_rx.wait_for(WorkerState::is_dead).await;
    }
}

#[async_trait]
impl WorkerControl for WorkerSupervisor {
    type Handle = WorkerHandle;

    async fn start_worker(&self, artifact: &Path) -> SupervisorResult<WorkerHandle> {
        self.start(artifact).await
    }

    async fn stop_worker(&self, handle: &WorkerHandle) -> SupervisorResult<()> {
        self.stop(handle).await;
        Ok(())
    }

    fn is_alive(&self, handle: &WorkerHandle) -> bool {
        !handle.state().is_dead()
    }
}

/// Own the child process until it exits.
async fn monitor(
    id: WorkerId,
    mut child: Child,
    stdout: ChildStdout,
    state_tx: watch::Sender<WorkerState>,
    ready_tx: oneshot::Sender<()>,
    mut stop_rx: mpsc::Receiver<()>,
    shutdown_timeout: Duration,
) {
    let mut lines = BufReader::new(stdout).lines();
    let mut stdout_open = true;
    let mut ready_tx = Some(ready_tx);

    loop {
        // Buffered output is drained before the exit is observed
        tokio::select! {
            biased;
            line = lines.next_line(), if stdout_open => match line {
                Ok(Some(line)) => {
                    if handle_line(id, &line, &state_tx)
                        && let Some(ready_tx) = ready_tx.take()
                    {
                        let _ = ready_tx.send(());
                    }
                }
                Ok(None) => stdout_open = false,
                Err(e) => {
                    warn!("Failed to read worker {id} stdout: {e}");
                    stdout_open = false;
                }
            },
            status = child.wait() => {
                let code = match status {
                    Ok(status) => status.code(),
                    Err(e) => {
                        warn!("Failed to wait on worker {id}: {e}");
                        None
                    }
                };
                report_exit(id, *state_tx.borrow(), code);
                state_tx.send_replace(WorkerState::Dead { code });
                return;
            }
            // `None` means the handle was dropped
            _ = stop_rx.recv() => {
                state_tx.send_replace(WorkerState::Terminating);
                let code = terminate(id, &mut child, shutdown_timeout).await;
                info!("Worker {id} stopped (code {code:?})");
                state_tx.send_replace(WorkerState::Dead { code });
                return;
            }
        }
    }
}

/// Returns whether the line promoted the worker to Ready
fn handle_line(id: WorkerId, line: &str, state_tx: &watch::Sender<WorkerState>) -> bool {
    match parse_line(line) {
        Some(WorkerMessage::Ready) => {
            let promoted = state_tx.send_if_modified(|state| {
                if *state == WorkerState::Starting {
                    *state = WorkerState::Ready;
                    true
                } else {
                    false
                }
            });
            if !promoted {
                debug!("Worker {id} sent a duplicate ready message, ignoring");
            }
            promoted
        }
        None => {
            info!("[worker {id}] {line}");
            false
        }
    }
}

fn report_exit(id: WorkerId, previous: WorkerState, code: Option<i32>) {
    match (previous, code) {
        (WorkerState::Ready, Some(0)) => info!("Worker {id} exited"),
        (WorkerState::Ready, _) => error!("Worker {id} exited abnormally (code {code:?})"),
        (_, _) => warn!("Worker {id} exited (code {code:?})"),
    }
}

/// Ask the process to exit, killing it if it ignores the request.
async fn terminate(id: WorkerId, child: &mut Child, shutdown_timeout: Duration) -> Option<i32> {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            debug!("Sending SIGTERM to worker {id} (PID {pid})");
            match i32::try_from(pid) {
                Ok(raw) => {
                    if let Err(e) = kill(Pid::from_raw(raw), Signal::SIGTERM) {
                        warn!("{}", SupervisorError::signal(pid, e.to_string()));
                    }
                }
                Err(_) => error!(
                    "{}",
                    SupervisorError::signal(pid, "PID out of range for a signal")
                ),
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = child.start_kill() {
            warn!("Failed to kill worker {id}: {e}");
        }
    }

    match tokio::time::timeout(shutdown_timeout, child.wait()).await {
        Ok(Ok(status)) => status.code(),
        Ok(Err(e)) => {
            warn!("Failed to wait on worker {id}: {e}");
            None
        }
        Err(_) => {
            warn!(
                "Worker {id} did not exit within {}ms, killing it",
                shutdown_timeout.as_millis()
            );
            if let Err(e) = child.kill().await {
                warn!("Failed to kill worker {id}: {e}");
            }
            child.wait().await.ok().and_then(|status| status.code())
        }
    }
}

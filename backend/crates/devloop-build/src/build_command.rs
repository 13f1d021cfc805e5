use crate::{BuildError, BuildTarget, Result as BuildResult};

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Run a target's build command from `cwd` with inherited stdio.
///
/// Returns whether the build succeeded (exit status 0). A command that cannot
/// be spawned at all is an error.
pub async fn run_build(target: BuildTarget, command: &[String], cwd: &Path) -> BuildResult<bool> {
    let Some((program, args)) = command.split_first() else {
        return Err(BuildError::empty_command(target));
    };

    log::info!("Building {}: {}", target, command.join(" "));

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| BuildError::command_spawn(program, e))?;

    if !status.success() {
        log::debug!("{} build exited with {}", target, status);
    }

    Ok(status.success())
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "devloop")]
#[command(about = "Rebuilds, restarts and live-reloads a server-rendered app during development")]
#[command(version)]
pub struct Cli {
    /// Directory holding config.toml (defaults to $DEVLOOP_CONFIG_DIR, then ./.devloop)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Project root the worker and build commands run from (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Port for the dev server, overriding server.port
    #[arg(long)]
    pub port: Option<u16>,

    /// Skip the build pipelines and serve the existing artifact
    #[arg(long)]
    pub no_build: bool,
}

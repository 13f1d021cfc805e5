use devloop_build::{BuildPipeline, BuildTarget};
use devloop_config::Config;
use devloop_reload::{
    BroadcastConfig, Publish, ReloadBroadcaster, ReloadState, ShutdownCoordinator, StreamConfig,
};
use devloop_server::{Cli, DevLoop, HealthState, build_router, logger};
use devloop_supervisor::{
    ChangeNotificationGate, RestartCoordinator, WorkerSettings, WorkerSupervisor,
};

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Build events buffered between the pipelines and the dev loop
const EVENT_BUFFER: usize = 32;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => Config::config_dir()?,
    };
    let mut config = Config::load_from_dir(&config_dir)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = if let Some(ref filename) = config.logging.file {
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting devloop v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let project_root = match cli.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir()?,
    };
    info!("Project root: {}", project_root.display());

    let shutdown = ShutdownCoordinator::new();
    let broadcaster = ReloadBroadcaster::new(BroadcastConfig {
        channel_capacity: config.reload.channel_capacity,
    });
    let publisher: Arc<dyn Publish> = Arc::new(broadcaster.clone());

    let supervisor = WorkerSupervisor::new(WorkerSettings::from_config(
        &config.worker,
        &project_root,
    ));
    let coordinator = RestartCoordinator::new(
        supervisor,
        config.artifact_path(&project_root),
        ChangeNotificationGate::new(),
        Arc::clone(&publisher),
    );
    let dev_loop = DevLoop::new(
        coordinator.clone(),
        config.reload.settle_delay(),
        publisher,
    );

    // Spawn build pipelines
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let mut pipelines = Vec::new();

    if cli.no_build {
        info!(
            "Build pipelines disabled, starting worker from {}",
            coordinator.artifact().display()
        );
        coordinator.request_restart();
    } else {
        for (target, target_config) in [
            (BuildTarget::Client, &config.build.client),
            (BuildTarget::Server, &config.build.server),
        ] {
            if !target_config.enabled {
                info!("{target} build pipeline disabled");
                continue;
            }

            let pipeline = BuildPipeline::from_config(
                target,
                target_config,
                &project_root,
                config.build.debounce(),
            )?;
            let events_tx = events_tx.clone();
            let shutdown_rx = shutdown.subscribe();

            pipelines.push(tokio::spawn(async move {
                if let Err(e) = pipeline.run(events_tx, shutdown_rx).await {
                    error!("{target} build pipeline stopped: {e}");
                }
            }));
        }
    }
    drop(events_tx);

    let dev_loop_task = tokio::spawn(dev_loop.run(events_rx));

    // Build router
    let app = build_router(
        HealthState {
            restarts: Arc::new(coordinator.clone()),
            broadcaster: broadcaster.clone(),
        },
        ReloadState {
            broadcaster,
            shutdown: shutdown.clone(),
            config: StreamConfig {
                path: config.reload.path.clone(),
                heartbeat: config.reload.heartbeat(),
            },
        },
    );

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);
    info!(
        "Reload stream at http://{}{}",
        actual_addr, config.reload.path
    );

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    let mut guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await?;

    // Builds still running are killed with their task
    for pipeline in &pipelines {
        pipeline.abort();
    }
    dev_loop_task.abort();

    coordinator.shutdown().await;
    if let Some(ticket) = coordinator.current_restart()
        && !ticket.is_settled()
    {
        warn!("Restart #{} still pending at shutdown", ticket.id());
    }

    info!("Graceful shutdown complete");
    Ok(())
}

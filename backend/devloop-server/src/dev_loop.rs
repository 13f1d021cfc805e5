//! Routes build events to the restart coordinator and the client gate.

use devloop_build::{BuildEvent, BuildTarget};
use devloop_reload::{Publish, ReloadEvent};
use devloop_supervisor::{
    ClientBuildGate, ClientSettle, RestartCoordinator, RestartStatus, WorkerControl,
};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;

pub struct DevLoop<W: WorkerControl> {
    coordinator: RestartCoordinator<W>,
    client_gate: ClientBuildGate,
    publisher: Arc<dyn Publish>,
}

impl<W: WorkerControl> Clone for DevLoop<W> {
    fn clone(&self) -> Self {
        Self {
            coordinator: self.coordinator.clone(),
            client_gate: self.client_gate.clone(),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<W: WorkerControl> DevLoop<W> {
    pub fn new(
        coordinator: RestartCoordinator<W>,
        settle_delay: Duration,
        publisher: Arc<dyn Publish>,
    ) -> Self {
        let client_gate = coordinator.client_gate(settle_delay);
        Self {
            coordinator,
            client_gate,
            publisher,
        }
    }

    /// Handle build events until every pipeline has hung up.
    ///
    /// Each event gets its own task so client and server builds interleave.
    pub async fn run(self, mut events_rx: mpsc::Receiver<BuildEvent>) {
        while let Some(event) = events_rx.recv().await {
            let dev_loop = self.clone();
            tokio::spawn(async move { dev_loop.handle(event).await });
        }
        debug!("All build pipelines closed, dev loop finished");
    }

    pub async fn handle(&self, event: BuildEvent) {
        if !event.success {
            warn!(
                "{} build #{} failed, waiting for the next change",
                event.target, event.build_id
            );
            return;
        }

        match event.target {
            BuildTarget::Server => self.on_server_build(&event).await,
            BuildTarget::Client => self.on_client_build(&event).await,
        }
    }

    async fn on_server_build(&self, event: &BuildEvent) {
        if event.touched_server_components {
            self.coordinator.gate().mark_server_component_changed();
        }

        info!("server build #{} succeeded, restarting worker", event.build_id);
        if let RestartStatus::Failed { reason } = self.coordinator.on_server_build_succeeded().await
        {
            warn!(
                "Worker restart after server build #{} failed: {reason}",
                event.build_id
            );
        }
    }

    async fn on_client_build(&self, event: &BuildEvent) {
        if let ClientSettle::AfterRestart(_) = self.client_gate.on_client_build_succeeded().await {
            debug!(
                "client build #{} settled after server restart",
                event.build_id
            );
        }

        info!("client build #{} ready", event.build_id);
        self.publisher.publish(ReloadEvent::ClientBuilt {
            build_id: event.build_id,
        });
    }
}

use super::{READY_TIMEOUT, STARTUP, StartOutcome, harness};
use crate::{ClientSettle, RestartStatus};

use tokio::time::{Duration, Instant, sleep};

const SETTLE: Duration = Duration::from_secs(1);

#[tokio::test(start_paused = true)]
async fn given_no_restart_ever_when_client_built_then_immediate() {
    let h = harness();
    let gate = h.coordinator.client_gate(SETTLE);

    let started_at = Instant::now();
    let settle = gate.on_client_build_succeeded().await;

    assert_eq!(settle, ClientSettle::Immediate);
    assert_eq!(started_at.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn given_restart_already_settled_when_client_built_then_immediate() {
    let h = harness();
    let gate = h.coordinator.client_gate(SETTLE);
    h.coordinator.on_server_build_succeeded().await;

    let started_at = Instant::now();
    let settle = gate.on_client_build_succeeded().await;

    assert_eq!(settle, ClientSettle::Immediate);
    assert_eq!(started_at.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn given_restart_in_flight_when_client_built_then_waits_for_restart_and_settle_delay() {
    let h = harness();
    let gate = h.coordinator.client_gate(SETTLE);

    let started_at = Instant::now();
    let ticket = h.coordinator.request_restart();
    let settle = gate.on_client_build_succeeded().await;

    assert_eq!(settle, ClientSettle::AfterRestart(RestartStatus::Succeeded));
    assert!(ticket.is_settled());
    let elapsed = started_at.elapsed();
    assert!(elapsed >= STARTUP + SETTLE, "elapsed {elapsed:?}");
    assert!(elapsed < STARTUP + SETTLE + Duration::from_millis(50), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn given_failed_restart_in_flight_when_client_built_then_still_settles_after_delay() {
    let h = harness();
    h.workers.script([StartOutcome::Timeout]);
    let gate = h.coordinator.client_gate(SETTLE);

    let started_at = Instant::now();
    h.coordinator.request_restart();
    let settle = gate.on_client_build_succeeded().await;

    assert!(matches!(
        settle,
        ClientSettle::AfterRestart(RestartStatus::Failed { .. })
    ));
    assert!(started_at.elapsed() >= READY_TIMEOUT + SETTLE);
}

#[tokio::test(start_paused = true)]
async fn given_unrelated_restart_pending_when_client_built_then_delayed_until_settled() {
    let h = harness();
    let gate = h.coordinator.client_gate(SETTLE);

    let ticket = h.coordinator.request_restart();
    sleep(STARTUP / 2).await;

    let client = tokio::spawn({
        let gate = gate.clone();
        async move {
            gate.on_client_build_succeeded().await;
            Instant::now()
        }
    });

    ticket.settled().await;
    let restart_settled_at = Instant::now();
    let client_settled_at = client.await.unwrap();

    assert!(client_settled_at >= restart_settled_at + SETTLE);
}

#[tokio::test(start_paused = true)]
async fn given_restart_queued_behind_running_one_when_client_built_then_waits_for_queued() {
    let h = harness();
    let gate = h.coordinator.client_gate(SETTLE);

    let first = h.coordinator.request_restart();
    sleep(STARTUP / 5).await;
    let second = h.coordinator.request_restart();

    gate.on_client_build_succeeded().await;

    assert!(first.is_settled());
    assert!(second.is_settled());
    assert_eq!(h.workers.started(), 2);
}

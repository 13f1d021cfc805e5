use crate::Config;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok, some};

fn with(mutate: impl FnOnce(&mut Config)) -> Config {
    let mut config = Config::default();
    mutate(&mut config);
    config
}

#[test]
fn given_port_below_1024_when_validate_then_error() {
    let config = with(|c| c.server.port = 80);

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_port_zero_when_validate_then_ok() {
    let config = with(|c| c.server.port = 0);

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_same_server_and_worker_port_when_validate_then_error() {
    let config = with(|c| {
        c.server.port = 3000;
        c.worker.port = 3000;
    });

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_ready_timeout_too_small_when_validate_then_worker_error() {
    let config = with(|c| c.worker.ready_timeout_ms = 10);

    let error = config.validate().unwrap_err();

    assert_that!(error.category(), some(eq("Worker")));
}

#[test]
fn given_empty_runtime_when_validate_then_error() {
    let config = with(|c| c.worker.runtime = "  ".into());

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_relative_hmr_path_when_validate_then_reload_error() {
    let config = with(|c| c.reload.path = "__rspack_hmr".into());

    let error = config.validate().unwrap_err();

    assert_that!(error.category(), some(eq("Reload")));
}

#[test]
fn given_zero_heartbeat_when_validate_then_error() {
    let config = with(|c| c.reload.heartbeat_secs = 0);

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_excessive_settle_delay_when_validate_then_error() {
    let config = with(|c| c.reload.settle_delay_ms = 120_000);

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_settle_delay_when_validate_then_ok() {
    let config = with(|c| c.reload.settle_delay_ms = 0);

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_enabled_target_without_command_when_validate_then_build_error() {
    let config = with(|c| c.build.client.command.clear());

    let error = config.validate().unwrap_err();

    assert_that!(error.category(), some(eq("Build")));
}

#[test]
fn given_disabled_target_without_command_when_validate_then_ok() {
    let config = with(|c| {
        c.build.client.enabled = false;
        c.build.client.command.clear();
        c.build.client.watch.clear();
    });

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_target_without_watch_roots_when_validate_then_error() {
    let config = with(|c| c.build.server.watch.clear());

    assert_that!(config.validate(), err(anything()));
}

use crate::{BuildError, BuildTarget, run_build};

fn sh(script: &str) -> Vec<String> {
    vec![String::from("sh"), String::from("-c"), script.to_string()]
}

#[tokio::test]
async fn given_zero_exit_when_built_then_success() {
    let cwd = std::env::temp_dir();

    let success = run_build(BuildTarget::Server, &sh("exit 0"), &cwd).await.unwrap();

    assert!(success);
}

#[tokio::test]
async fn given_non_zero_exit_when_built_then_failure() {
    let cwd = std::env::temp_dir();

    let success = run_build(BuildTarget::Client, &sh("exit 2"), &cwd).await.unwrap();

    assert!(!success);
}

#[tokio::test]
async fn given_empty_command_when_built_then_error() {
    let result = run_build(BuildTarget::Client, &[], &std::env::temp_dir()).await;

    assert!(matches!(
        result,
        Err(BuildError::EmptyCommand {
            target: BuildTarget::Client,
            ..
        })
    ));
}

#[tokio::test]
async fn given_missing_program_when_built_then_spawn_error() {
    let command = vec![String::from("devloop-no-such-bundler")];

    let result = run_build(BuildTarget::Server, &command, &std::env::temp_dir()).await;

    assert!(matches!(result, Err(BuildError::CommandSpawn { .. })));
}

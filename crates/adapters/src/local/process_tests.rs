// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::testing::write_script;
use qj_core::{build, Invocation, JobConfig, RunEnvironment, SitePaths};
use tempfile::TempDir;

fn local(handler: &Path, results: &Path) -> (LocalInvocation, Vec<(String, String)>) {
    let config = JobConfig::new("local", "bin/hello", results, 2, 3).unwrap();
    let env = RunEnvironment::publish(&config, &SitePaths::new("/run", "/install")).unwrap();
    match build(&config, &env, handler, false) {
        Invocation::Local(local) => (local, env.vars()),
        Invocation::Scheduler(_) => panic!("expected local invocation"),
    }
}

#[tokio::test]
async fn runs_handler_and_captures_streams() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(
        dir.path(),
        "handler.sh",
        "echo \"npes=$PV_NPES cmd=$USER_CMD\"",
    );
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    assert_eq!(output.exit_code, 0);
    assert_eq!(output.stdout, "npes=6 cmd=/run/bin/hello\n");
    assert!(output.stderr.is_empty());
    assert!(!output.is_failure());
}

#[tokio::test]
async fn output_is_appended_to_job_log() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(
        dir.path(),
        "handler.sh",
        "echo out\nsleep 0.1\necho err >&2",
    );
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let runner = ProcessRunner::new();
    runner.run(&invocation, &env).await.unwrap();
    runner.run(&invocation, &env).await.unwrap();

    let log = std::fs::read_to_string(results.join("job.log")).unwrap();
    assert_eq!(log, "out\nerr\nout\nerr\n");
}

#[tokio::test]
async fn non_zero_exit_is_reported_not_raised() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "exit 2");

    let (invocation, env) = local(&handler, dir.path());
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    assert_eq!(output.exit_code, 2);
    assert!(output.is_failure());
}

#[tokio::test]
async fn stderr_alone_counts_as_failure() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "echo careful >&2");

    let (invocation, env) = local(&handler, dir.path());
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    assert_eq!(output.exit_code, 0);
    assert_eq!(output.stderr, "careful\n");
    assert!(output.is_failure());
}

#[tokio::test]
async fn handler_runs_in_results_dir() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "pwd");
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
    assert_eq!(reported, std::fs::canonicalize(&results).unwrap());
}

#[tokio::test]
async fn missing_handler_fails_to_spawn() {
    let dir = TempDir::new().unwrap();
    let (invocation, env) = local(&dir.path().join("nope.sh"), dir.path());

    let err = ProcessRunner::new().run(&invocation, &env).await.unwrap_err();
    assert!(matches!(err, LocalRunError::Spawn { .. }));
}

#[tokio::test]
async fn slow_handler_times_out() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "sleep 5");

    let (invocation, env) = local(&handler, dir.path());
    let err = ProcessRunner::new()
        .with_timeout(Some(Duration::from_millis(100)))
        .run(&invocation, &env)
        .await
        .unwrap_err();

    assert!(matches!(err, LocalRunError::TimedOut { .. }));
}

#[tokio::test]
async fn timed_out_handler_keeps_partial_output_in_log() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "echo started\nsleep 5");
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let err = ProcessRunner::new()
        .with_timeout(Some(Duration::from_millis(500)))
        .run(&invocation, &env)
        .await
        .unwrap_err();

    assert!(matches!(err, LocalRunError::TimedOut { .. }));
    let log = std::fs::read_to_string(results.join("job.log")).unwrap();
    assert_eq!(log, "started\n");
}

#[tokio::test]
async fn streams_are_logged_in_arrival_order() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(
        dir.path(),
        "handler.sh",
        "echo one\nsleep 0.1\necho two >&2\nsleep 0.1\necho three",
    );
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    assert_eq!(output.stdout, "one\nthree\n");
    assert_eq!(output.stderr, "two\n");
    let log = std::fs::read_to_string(results.join("job.log")).unwrap();
    assert_eq!(log, "one\ntwo\nthree\n");
}

#[tokio::test]
async fn nested_job_log_does_not_move_working_directory() {
    let dir = TempDir::new().unwrap();
    let handler = write_script(dir.path(), "handler.sh", "pwd");
    let results = dir.path().join("results");

    let (invocation, env) = local(&handler, &results);
    let invocation = invocation.with_log_file("logs/job.log");
    let output = ProcessRunner::new().run(&invocation, &env).await.unwrap();

    let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
    assert_eq!(reported, std::fs::canonicalize(&results).unwrap());
    let log = std::fs::read_to_string(results.join("logs").join("job.log")).unwrap();
    assert_eq!(log, output.stdout);
}

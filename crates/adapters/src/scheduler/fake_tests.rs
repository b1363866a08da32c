// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use qj_core::{build_scheduler_command, JobConfig, RunEnvironment, SitePaths};
use std::path::Path;

fn command() -> SchedulerCommand {
    let config = JobConfig::new("fake", "cmd", "/results", 1, 1).unwrap();
    let env = RunEnvironment::publish(&config, &SitePaths::new("/run", "/install")).unwrap();
    build_scheduler_command(&config, &env, Path::new("/install/handler"))
}

#[tokio::test]
async fn fake_scheduler_records_calls() {
    let adapter = FakeSchedulerAdapter::available("99\n");

    assert!(adapter.is_available().await);
    let output = adapter
        .submit(&command(), &[("K".to_string(), "V".to_string())])
        .await
        .unwrap();

    assert_eq!(output.stdout, "99\n");
    let calls = adapter.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], SchedulerCall::Probe));
    assert!(matches!(
        &calls[1],
        SchedulerCall::Submit { program, env, .. } if program == "qsub" && env.len() == 1
    ));
}

#[tokio::test]
async fn fake_scheduler_can_fail_spawn() {
    let adapter = FakeSchedulerAdapter::available("1\n");
    adapter.fail_spawn("permission denied");

    let err = adapter.submit(&command(), &[]).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Spawn { .. }));
}

#[tokio::test]
async fn fake_scheduler_defaults_to_unavailable() {
    let adapter = FakeSchedulerAdapter::unavailable();
    assert!(!adapter.is_available().await);

    adapter.set_available(true);
    assert!(adapter.is_available().await);
}

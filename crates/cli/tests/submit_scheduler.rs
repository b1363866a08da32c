// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qj submit` against a (fake) PBS installation

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{Site, ENTRY, HANDLER};
use predicates::prelude::*;

#[test]
fn prints_markers_and_job_id() {
    let site = Site::new();
    site.file("entry.toml", ENTRY);
    site.with_scheduler("printf '4242\\r\\n'");

    site.submit()
        .assert()
        .success()
        .stdout(predicate::str::contains("<nnodes> 2"))
        .stdout(predicate::str::contains("<npes> 32"))
        .stdout(predicate::str::contains("<JobID> 4242"));
}

#[test]
fn qsub_receives_discrete_args_and_run_parameters() {
    let site = Site::new();
    site.file("entry.toml", ENTRY);
    site.with_scheduler(&format!(
        "printf '%s\\n' \"$@\" > '{dir}/args.txt'\n\
         echo \"$PV_NPES $GZ_NPES $PV_NNODES $USER_CMD\" > '{dir}/env.txt'\n\
         echo 7",
        dir = site.path().display()
    ));

    site.submit().assert().success();

    let results = site.results().display().to_string();
    let expected = [
        "-V".to_string(),
        "-q".to_string(),
        "regular".to_string(),
        "-N".to_string(),
        "hello".to_string(),
        "-A".to_string(),
        "proj123".to_string(),
        "-o".to_string(),
        format!("{}/drm.stdout", results),
        "-e".to_string(),
        format!("{}/drm.stderr", results),
        "-l".to_string(),
        "nodes=2,walltime=01:00:00".to_string(),
        site.path().join("install").join(HANDLER).display().to_string(),
    ];
    let args = site.read("args.txt");
    assert_eq!(args.lines().collect::<Vec<_>>(), expected);

    let env = site.read("env.txt");
    assert_eq!(
        env.trim(),
        format!("32 32 2 {}/run/bin/hello", site.path().display())
    );
}

#[test]
fn missing_job_id_fails() {
    let site = Site::new();
    site.file("entry.toml", ENTRY);
    site.with_scheduler("echo 'queued somewhere'");

    site.submit()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no job identifier"));
}

#[test]
fn missing_job_id_with_placeholder_reports_zero() {
    let site = Site::new();
    site.file("entry.toml", ENTRY);
    site.with_scheduler("echo 'queued somewhere'");

    site.submit()
        .arg("--placeholder-job-id")
        .assert()
        .success()
        .stdout(predicate::str::contains("<JobID> 0"));
}

#[test]
fn rejected_submission_fails() {
    let site = Site::new();
    site.file("entry.toml", ENTRY);
    site.with_scheduler("echo 'qsub: Unknown queue' >&2\nexit 170");

    site.submit()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown queue"));
}

#[test]
fn malformed_time_limit_submits_without_walltime() {
    let site = Site::new();
    site.file(
        "entry.toml",
        &ENTRY.replace("time_limit = \"01:00:00\"", "time_limit = [1, 0]"),
    );
    site.with_scheduler(&format!(
        "printf '%s\\n' \"$@\" > '{}/args.txt'\necho 8",
        site.path().display()
    ));

    site.submit()
        .assert()
        .success()
        .stdout(predicate::str::contains("<JobID> 8"))
        .stderr(predicate::str::contains("time_limit"));

    let args = site.read("args.txt");
    assert!(args.lines().any(|l| l == "nodes=2"), "args:\n{}", args);
    assert!(!args.contains("walltime"), "args:\n{}", args);
}

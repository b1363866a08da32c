// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Handler location under the install root
pub const HANDLER: &str = "PAV/modules/pbs_job_handler.py";

/// Job entry matching the documented example
pub const ENTRY: &str = r#"
[run]
cmd = "bin/hello"
test_args = "-n 4"

[pbs]
queue = "regular"
account = "proj123"
time_limit = "01:00:00"
node_list = ""
num_nodes = 2
procs_per_node = 16
"#;

/// An isolated host: scheduler binaries, install root, run home and results.
pub struct Site {
    temp: TempDir,
}

impl Site {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        for dir in ["bin", "install", "run", "results"] {
            fs::create_dir_all(temp.path().join(dir)).expect("Failed to create site dir");
        }
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn bin(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn results(&self) -> PathBuf {
        self.path().join("results")
    }

    /// Write a file relative to the site root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write an executable `/bin/sh` script relative to the site root
    pub fn script(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.file(rel, &format!("#!/bin/sh\n{}\n", body));
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Install fake `qstat` and `qsub`; qsub runs `body`
    pub fn with_scheduler(&self, qsub_body: &str) {
        self.script("bin/qstat", "exit 0");
        self.script("bin/qsub", qsub_body);
    }

    /// Install the job handler
    pub fn with_handler(&self, body: &str) {
        self.script(&format!("install/{}", HANDLER), body);
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).expect("Failed to read file")
    }

    /// The qj binary with PATH and harness locations pointed at this site
    pub fn qj(&self) -> Command {
        let mut cmd = Command::cargo_bin("qj").expect("qj binary builds");
        cmd.current_dir(self.path())
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin().display()))
            .env("PVINSTALL", self.path().join("install"))
            .env("PV_RUNHOME", self.path().join("run"))
            .env("RUST_LOG", "warn");
        cmd
    }

    /// `qj submit` for `entry.toml` with the default name and results dir
    pub fn submit(&self) -> Command {
        let mut cmd = self.qj();
        cmd.args(["submit", "entry.toml", "--name", "hello", "--results-dir"])
            .arg(self.results());
        cmd
    }
}

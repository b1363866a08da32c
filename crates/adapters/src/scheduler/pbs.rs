// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PBS/Torque scheduler adapter

use super::{ClientOutput, SchedulerAdapter, SubmissionError};
use crate::path::find_in_path;
use async_trait::async_trait;
use qj_core::SchedulerCommand;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Binary whose presence means a PBS scheduler is reachable
pub const QSTAT: &str = "qstat";

/// PBS adapter driving `qstat` and `qsub`
#[derive(Clone, Default)]
pub struct PbsAdapter {
    search_path: Option<OsString>,
    timeout: Option<Duration>,
}

impl PbsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up scheduler binaries in this PATH-style list instead of `PATH`
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Give up on the submission client after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SchedulerAdapter for PbsAdapter {
    async fn is_available(&self) -> bool {
        find_in_path(QSTAT, self.search_path.as_deref()).is_some()
    }

    async fn submit(
        &self,
        cmd: &SchedulerCommand,
        env: &[(String, String)],
    ) -> Result<ClientOutput, SubmissionError> {
        let program = cmd.program().to_string();
        let binary = find_in_path(&program, self.search_path.as_deref())
            .ok_or_else(|| SubmissionError::NotFound(program.clone()))?;

        let mut child = Command::new(&binary);
        child
            .args(cmd.args())
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let running = child.output();
        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, running)
                .await
                .map_err(|_| SubmissionError::TimedOut {
                    program: program.clone(),
                    timeout,
                })?,
            None => running.await,
        }
        .map_err(|source| SubmissionError::Spawn {
            program: program.clone(),
            source,
        })?;

        let captured = ClientOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(SubmissionError::Rejected {
                program,
                code: output.status.code().unwrap_or(-1),
                output: captured.combined(),
            });
        }

        Ok(captured)
    }
}

#[cfg(test)]
#[path = "pbs_tests.rs"]
mod tests;

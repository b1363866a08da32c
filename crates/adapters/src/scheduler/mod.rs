// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch scheduler adapters

mod pbs;

pub use pbs::PbsAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSchedulerAdapter, SchedulerCall};

use async_trait::async_trait;
use qj_core::SchedulerCommand;
use std::time::Duration;
use thiserror::Error;

/// Errors from running the scheduler submission client
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("scheduler client not found on PATH: {0}")]
    NotFound(String),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} did not exit within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program} exited with status {code}: {output}")]
    Rejected {
        program: String,
        code: i32,
        output: String,
    },
}

/// Captured output of the submission client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ClientOutput {
    /// Both streams as a single blob, stdout first
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() && !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

/// Adapter for a batch scheduler
#[async_trait]
pub trait SchedulerAdapter: Clone + Send + Sync + 'static {
    /// Whether the scheduler can be reached from this host.
    ///
    /// Never fails; an unreachable scheduler is simply `false`.
    async fn is_available(&self) -> bool;

    /// Run a submission and wait for the client to exit.
    ///
    /// `env` is layered over the inherited environment of the client only.
    async fn submit(
        &self,
        cmd: &SchedulerCommand,
        env: &[(String, String)],
    ) -> Result<ClientOutput, SubmissionError>;
}
